use tracing_subscriber::EnvFilter;

use crate::error::{LinkError, Result};

/// Installs the global `tracing` subscriber. Filtering follows `RUST_LOG`,
/// defaulting to `info`; output goes to stderr so stdout stays free for
/// previews and summaries.
pub fn init_tracing() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| LinkError::Logging(error.to_string()))
}
