use std::path::Path;

use tracing::debug;

use crate::error::Result;
use crate::io::header_names;
use crate::model::{Table, Value};

const CANDIDATE_DELIMITERS: [u8; 4] = [b'\t', b';', b',', b'|'];
const SNIFF_RECORDS: usize = 10;

/// Reads a delimited text file. The first record is the header, with blank
/// or repeated names made unique; every other field is kept as text, empty
/// fields become nulls.
pub fn read_table(path: &Path) -> Result<Table> {
    let bytes = std::fs::read(path)?;
    let content = decode(bytes);
    let delimiter = sniff_delimiter(&content);
    debug!(delimiter = %char::from(delimiter).escape_default(), "delimiter detected");
    parse_table(&content, delimiter)
}

/// Parses delimited text already held in memory.
pub fn parse_table(content: &str, delimiter: u8) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let columns = header_names(reader.headers()?.iter().map(str::to_string));

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let row: Vec<Value> = record
            .iter()
            .take(columns.len())
            .map(|field| {
                if field.is_empty() {
                    Value::Null
                } else {
                    Value::String(field.to_string())
                }
            })
            .collect();
        rows.push(row);
    }

    Ok(Table::from_rows(columns, rows))
}

/// UTF-8 when valid (minus a leading byte-order mark), otherwise
/// Windows-1252, which is what spreadsheet programs commonly emit.
fn decode(bytes: Vec<u8>) -> String {
    let content = match String::from_utf8(bytes) {
        Ok(content) => content,
        Err(error) => {
            let bytes = error.into_bytes();
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            decoded.into_owned()
        }
    };
    match content.strip_prefix('\u{feff}') {
        Some(stripped) => stripped.to_string(),
        None => content,
    }
}

/// Picks the delimiter whose leading records split most consistently into
/// more than one field, weighted by field count. Falls back to a comma.
fn sniff_delimiter(content: &str) -> u8 {
    let mut best = (0, b',');
    for delimiter in CANDIDATE_DELIMITERS {
        let widths = record_widths(content, delimiter);
        let Some(&first) = widths.first() else {
            continue;
        };
        if first <= 1 {
            continue;
        }
        let agreeing = widths.iter().filter(|&&width| width == first).count();
        if agreeing * first > best.0 {
            best = (agreeing * first, delimiter);
        }
    }
    best.1
}

// Field counts of the first records as the csv parser sees them, so a quoted
// field spanning several lines counts once.
fn record_widths(content: &str, delimiter: u8) -> Vec<usize> {
    csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes())
        .records()
        .take(SNIFF_RECORDS)
        .map_while(|record| record.ok())
        .map(|record| record.len())
        .collect()
}
