use std::path::Path;

use rust_xlsxwriter::{Format, Workbook, Worksheet};

use crate::error::{LinkError, Result};
use crate::model::{Table, Value};

/// Writes `table` as the only sheet of an `.xlsx` workbook at `path`.
pub fn write_table(path: &Path, table: &Table, sheet_name: &str) -> Result<()> {
    let mut workbook = build_workbook(table, sheet_name)?;
    workbook.save(path)?;
    Ok(())
}

/// Same workbook as [`write_table`], returned as bytes for callers that
/// serve the file for download instead of saving it.
pub fn write_table_to_buffer(table: &Table, sheet_name: &str) -> Result<Vec<u8>> {
    let mut workbook = build_workbook(table, sheet_name)?;
    Ok(workbook.save_to_buffer()?)
}

fn build_workbook(table: &Table, sheet_name: &str) -> Result<Workbook> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name)?;

    let header_format = Format::new().set_bold();
    for (col_idx, header) in table.columns.iter().enumerate() {
        worksheet.write_string_with_format(0, column_index(col_idx)?, header, &header_format)?;
    }

    for (row_idx, record) in table.records.iter().enumerate() {
        let row = u32::try_from(row_idx + 1)
            .map_err(|_| LinkError::InvalidWorkbook("too many rows for a worksheet".into()))?;
        for (col_idx, value) in table.row_cells(record).enumerate() {
            write_cell(worksheet, row, column_index(col_idx)?, value)?;
        }
    }

    Ok(workbook)
}

fn write_cell(worksheet: &mut Worksheet, row: u32, col: u16, value: &Value) -> Result<()> {
    match value {
        Value::String(text) => {
            worksheet.write_string(row, col, text)?;
        }
        Value::Number(number) if number.is_finite() => {
            worksheet.write_number(row, col, *number)?;
        }
        Value::Number(number) => {
            worksheet.write_string(row, col, &number.to_string())?;
        }
        Value::Boolean(flag) => {
            worksheet.write_boolean(row, col, *flag)?;
        }
        Value::Null => {}
    }
    Ok(())
}

fn column_index(idx: usize) -> Result<u16> {
    u16::try_from(idx)
        .map_err(|_| LinkError::InvalidWorkbook("too many columns for a worksheet".into()))
}
