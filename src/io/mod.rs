//! File adapters that turn uploaded files into [`Table`]s and write mapped
//! tables back out.

pub mod csv_read;
pub mod csv_write;
pub mod excel_read;
pub mod excel_write;

use std::collections::{HashMap, HashSet};
use std::path::Path;

use tracing::{info, instrument};

use crate::error::{LinkError, Result};
use crate::model::Table;

/// Sheet name used for exported mapped tables.
pub const DEFAULT_SHEET_NAME: &str = "Mapped_Data";

/// On-disk table representations, told apart by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    /// Delimited text (`.csv`, `.tsv`, `.txt`).
    Csv,
    /// Workbook readable by calamine (`.xlsx`, `.xlsm`, `.xlsb`, `.xls`, `.ods`).
    Spreadsheet,
}

impl TableFormat {
    pub fn detect(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());
        match extension.as_deref() {
            Some("csv" | "tsv" | "txt") => Ok(TableFormat::Csv),
            Some("xlsx" | "xlsm" | "xlsb" | "xls" | "ods") => Ok(TableFormat::Spreadsheet),
            _ => Err(LinkError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// Turns raw header cells into unique column names. Blank cells become
/// `Unnamed: <index>` and repeated names get a `.1`, `.2`, ... suffix, so
/// every source column survives as its own field.
pub fn header_names<I>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut used: HashSet<String> = HashSet::new();
    let mut next_suffix: HashMap<String, usize> = HashMap::new();
    raw.into_iter()
        .enumerate()
        .map(|(idx, name)| {
            let base = if name.is_empty() {
                format!("Unnamed: {idx}")
            } else {
                name
            };
            let mut name = base.clone();
            if used.contains(&name) {
                let suffix = next_suffix.entry(base.clone()).or_insert(1);
                loop {
                    name = format!("{base}.{suffix}");
                    *suffix += 1;
                    if !used.contains(&name) {
                        break;
                    }
                }
            }
            used.insert(name.clone());
            name
        })
        .collect()
}

/// Loads a table from `path`, choosing the reader from the extension.
#[instrument(level = "info", skip_all, fields(input = %path.display()))]
pub fn load_table(path: &Path) -> Result<Table> {
    if !path.exists() {
        return Err(LinkError::MissingInput(path.to_path_buf()));
    }
    let format = TableFormat::detect(path)?;
    let table = match format {
        TableFormat::Csv => csv_read::read_table(path)?,
        TableFormat::Spreadsheet => excel_read::read_table(path)?,
    };
    info!(
        ?format,
        columns = table.columns.len(),
        records = table.len(),
        "table loaded"
    );
    Ok(table)
}

/// Writes `table` to `path`: CSV for `.csv`/`.tsv`/`.txt`, otherwise a
/// single-sheet `.xlsx` workbook named `sheet_name`.
#[instrument(level = "info", skip_all, fields(output = %path.display()))]
pub fn write_table(path: &Path, table: &Table, sheet_name: &str) -> Result<()> {
    match TableFormat::detect(path)? {
        TableFormat::Csv => csv_write::write_table(path, table),
        TableFormat::Spreadsheet => {
            let extension = path.extension().and_then(|ext| ext.to_str());
            if !extension.is_some_and(|ext| ext.eq_ignore_ascii_case("xlsx")) {
                return Err(LinkError::UnsupportedFormat(path.to_path_buf()));
            }
            excel_write::write_table(path, table, sheet_name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_format_from_extension() {
        assert_eq!(
            TableFormat::detect(Path::new("portal.CSV")).unwrap(),
            TableFormat::Csv
        );
        assert_eq!(
            TableFormat::detect(Path::new("catalogue.xls")).unwrap(),
            TableFormat::Spreadsheet
        );
        assert!(matches!(
            TableFormat::detect(Path::new("notes.pdf")),
            Err(LinkError::UnsupportedFormat(_))
        ));
        assert!(TableFormat::detect(Path::new("no_extension")).is_err());
    }

    fn names(raw: &[&str]) -> Vec<String> {
        header_names(raw.iter().map(|name| name.to_string()))
    }

    #[test]
    fn repeated_headers_get_numeric_suffixes() {
        assert_eq!(
            names(&["ASIN", "Note", "Note", "Note"]),
            vec!["ASIN", "Note", "Note.1", "Note.2"]
        );
        // A generated name never collides with a real one.
        assert_eq!(names(&["A", "A.1", "A"]), vec!["A", "A.1", "A.2"]);
    }

    #[test]
    fn blank_headers_are_named_by_position() {
        assert_eq!(
            names(&["ASIN", "", "Title", ""]),
            vec!["ASIN", "Unnamed: 1", "Title", "Unnamed: 3"]
        );
    }

    #[test]
    fn missing_input_is_reported() {
        let error = load_table(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(error, LinkError::MissingInput(_)));
    }

    #[test]
    fn only_xlsx_is_written_as_workbook() {
        let table = Table::new(["ASIN"]);
        let error = write_table(Path::new("out.xls"), &table, DEFAULT_SHEET_NAME).unwrap_err();
        assert!(matches!(error, LinkError::UnsupportedFormat(_)));
    }
}
