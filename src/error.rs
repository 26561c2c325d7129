use std::path::PathBuf;

use thiserror::Error;

use crate::model::TableRole;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, LinkError>;

/// Error type covering the different failure cases that can occur when the
/// tool loads tables, links them, or writes the mapped result.
#[derive(Debug, Error)]
pub enum LinkError {
    /// A column required for linkage is absent from one of the input tables.
    #[error("{table} table must contain a '{column}' column")]
    MissingColumn { table: TableRole, column: String },

    /// Fuzzy-match threshold outside the inclusive 0–100 range.
    #[error("fuzzy matching threshold must be between 0 and 100, got {0}")]
    InvalidThreshold(i64),

    /// Wrapper for IO failures such as reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when a delimited text file cannot be parsed or written.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Raised when JSON serialization fails.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Errors bubbled up from the Excel writer implementation.
    #[error("Excel write error: {0}")]
    ExcelWrite(#[from] rust_xlsxwriter::XlsxError),

    /// Errors bubbled up from the spreadsheet reader implementation.
    #[error("Excel read error: {0}")]
    ExcelRead(#[from] calamine::Error),

    /// Raised when a workbook does not hold a readable table.
    #[error("invalid workbook structure: {0}")]
    InvalidWorkbook(String),

    /// Raised when the TOML configuration file cannot be parsed.
    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Raised when a parsed configuration holds unusable values.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Raised when the file extension does not name a supported table format.
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(PathBuf),

    /// Raised when the user provides a path that does not exist.
    #[error("input file not found: {0}")]
    MissingInput(PathBuf),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}
