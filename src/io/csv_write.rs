use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use csv::WriterBuilder;

use crate::error::Result;
use crate::model::Table;

/// Writes `table` as comma-separated text: the header, then one line per
/// record with nulls left empty.
pub fn write_table(path: &Path, table: &Table) -> Result<()> {
    let file = File::create(path)?;
    write_to(BufWriter::new(file), table)
}

/// Writes `table` to any byte sink.
pub fn write_to<W: Write>(sink: W, table: &Table) -> Result<()> {
    let mut writer = WriterBuilder::new().from_writer(sink);
    writer.write_record(&table.columns)?;
    for record in &table.records {
        writer.write_record(table.row_cells(record).map(|value| value.to_string()))?;
    }
    writer.flush()?;
    Ok(())
}
