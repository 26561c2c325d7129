use tracing::{debug, info, instrument};

use crate::error::Result;
use crate::linkage::lookup::{ExactIndex, key_text};
use crate::linkage::{KeyNormalization, LinkColumns, map_records};
use crate::model::{Table, Value};
use crate::schema::validate_linkage;

/// Left-joins the catalogue's target column onto the portal by exact key.
///
/// Keys are compared by their literal text. When the catalogue repeats a
/// key, the last occurrence supplies the target.
pub fn exact_join(portal: &Table, catalogue: &Table, columns: &LinkColumns) -> Result<Table> {
    exact_join_with(portal, catalogue, columns, KeyNormalization::default())
}

/// [`exact_join`] with keys normalised on both sides first.
#[instrument(
    level = "debug",
    skip_all,
    fields(portal_rows = portal.len(), catalogue_rows = catalogue.len())
)]
pub fn exact_join_with(
    portal: &Table,
    catalogue: &Table,
    columns: &LinkColumns,
    normalization: KeyNormalization,
) -> Result<Table> {
    validate_linkage(portal, catalogue, columns)?;

    let index = ExactIndex::build(catalogue, columns, normalization);
    debug!(distinct_keys = index.len(), "catalogue index built");

    let mapped = map_records(portal, &columns.target, |record| {
        key_text(record, &columns.key, normalization)
            .and_then(|key| index.get(&key))
            .cloned()
            .unwrap_or(Value::Null)
    });
    info!(records = mapped.len(), "exact join complete");
    Ok(mapped)
}
