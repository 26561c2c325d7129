use std::path::Path;

use calamine::{DataType, Reader, open_workbook_auto};

use crate::error::{LinkError, Result};
use crate::io::header_names;
use crate::model::{Table, Value};

/// Reads the first worksheet of a workbook. The first row is the header,
/// with blank or repeated names made unique. Blank rows inside the sheet are
/// kept as all-null records.
pub fn read_table(path: &Path) -> Result<Table> {
    let mut workbook = open_workbook_auto(path)?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| LinkError::InvalidWorkbook("workbook has no sheets".into()))?;
    let range = workbook
        .worksheet_range(&sheet_name)
        .ok_or_else(|| LinkError::InvalidWorkbook(format!("missing sheet '{sheet_name}'")))?
        .map_err(LinkError::from)?;

    let mut rows = range.rows();
    let columns: Vec<String> = match rows.next() {
        Some(header) => header_names(header.iter().map(cell_to_string)),
        None => return Ok(Table::default()),
    };

    let body: Vec<Vec<Value>> = rows
        .map(|row| row.iter().take(columns.len()).map(cell_to_value).collect())
        .collect();

    Ok(Table::from_rows(columns, body))
}

fn cell_to_value(cell: &DataType) -> Value {
    match cell {
        DataType::String(value) if value.is_empty() => Value::Null,
        DataType::String(value) => Value::String(value.clone()),
        DataType::Float(value) => Value::Number(*value),
        DataType::Int(value) => Value::Number(*value as f64),
        DataType::Bool(value) => Value::Boolean(*value),
        DataType::Empty => Value::Null,
        other => Value::String(other.to_string()),
    }
}

fn cell_to_string(cell: &DataType) -> String {
    match cell {
        DataType::String(value) => value.clone(),
        DataType::Float(value) => value.to_string(),
        DataType::Int(value) => value.to_string(),
        DataType::Bool(value) => value.to_string(),
        DataType::Empty => String::new(),
        other => other.to_string(),
    }
}
