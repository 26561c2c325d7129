use std::path::Path;

use tracing::{debug, info, instrument};

use crate::config::LinkConfig;
use crate::error::Result;
use crate::io;
use crate::linkage::{self, LinkSummary};
use crate::model::Table;

/// Tables involved in one mapping run, kept together for previews.
#[derive(Debug, Clone)]
pub struct MappingRun {
    pub portal: Table,
    pub catalogue: Table,
    pub mapped: Table,
    pub summary: LinkSummary,
}

/// Loads both files and links them according to `config`.
#[instrument(
    level = "info",
    skip_all,
    fields(portal = %portal_path.display(), catalogue = %catalogue_path.display())
)]
pub fn run_mapping(
    portal_path: &Path,
    catalogue_path: &Path,
    config: &LinkConfig,
) -> Result<MappingRun> {
    let options = config.link_options()?;
    let portal = io::load_table(portal_path)?;
    let catalogue = io::load_table(catalogue_path)?;
    debug!(
        portal_records = portal.len(),
        catalogue_records = catalogue.len(),
        "inputs loaded"
    );

    let mapped = linkage::link(&portal, &catalogue, &options)?;
    let summary = LinkSummary::from_mapped(&mapped, &options.columns.target, &options.strategy);
    info!(
        records = summary.records,
        matched = summary.matched,
        unmatched = summary.unmatched,
        "mapping complete"
    );

    Ok(MappingRun {
        portal,
        catalogue,
        mapped,
        summary,
    })
}

impl MappingRun {
    /// Writes the mapped table to `output`; see [`io::write_table`].
    #[instrument(level = "info", skip_all, fields(output = %output.display()))]
    pub fn export(&self, output: &Path, sheet_name: &str) -> Result<()> {
        io::write_table(output, &self.mapped, sheet_name)?;
        info!(records = self.mapped.len(), "mapped table written");
        Ok(())
    }
}

/// Renders the first `rows` records as tab-separated text under a header
/// line, with the total record count at the end.
pub fn render_preview(title: &str, table: &Table, rows: usize) -> String {
    let mut lines = vec![format!("== {title} =="), table.columns.join("\t")];
    lines.extend(table.records.iter().take(rows).map(|record| {
        table
            .row_cells(record)
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\t")
    }));
    lines.push(format!(
        "({} of {} records shown)",
        rows.min(table.len()),
        table.len()
    ));
    lines.join("\n") + "\n"
}
