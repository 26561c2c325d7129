use std::fmt;

/// Identifies which side of a linkage a table plays. Errors carry it so the
/// caller can tell a malformed portal file from a malformed catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableRole {
    /// The table being enriched.
    Portal,
    /// The reference table the target attribute is read from.
    Catalogue,
}

impl fmt::Display for TableRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableRole::Portal => write!(f, "portal"),
            TableRole::Catalogue => write!(f, "catalogue"),
        }
    }
}

/// Shared null used when a record lacks a column.
pub(crate) static NULL: Value = Value::Null;

/// Represents a scalar cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Plain string value.
    String(String),
    /// Floating point number.
    Number(f64),
    /// Boolean value.
    Boolean(bool),
    /// Absent value. Also used for "no match" in mapped tables.
    Null,
}

impl Value {
    /// Returns `true` for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Textual representation used when comparing keys. `None` for nulls.
    ///
    /// Numbers use the shortest decimal form, so a spreadsheet cell holding
    /// `12345.0` reads as `12345`.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Value::String(value) => Some(value.clone()),
            Value::Number(value) => Some(value.to_string()),
            Value::Boolean(value) => Some(value.to_string()),
            Value::Null => None,
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_text() {
            Some(text) => f.write_str(&text),
            None => Ok(()),
        }
    }
}

/// Ordered mapping from column name to value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, Value)>,
}

impl Record {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value stored under `column`, if the record carries it.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    /// Inserts or replaces a value. New columns are appended, existing ones
    /// keep their position.
    pub fn insert(&mut self, column: impl Into<String>, value: Value) {
        let column = column.into();
        match self.fields.iter_mut().find(|(name, _)| *name == column) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((column, value)),
        }
    }

    /// Iterates over `(column, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (column, value) in iter {
            record.insert(column, value);
        }
        record
    }
}

/// A header plus an ordered sequence of records.
///
/// Records may be sparse; a column counts as present in the table when the
/// header carries it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub columns: Vec<String>,
    pub records: Vec<Record>,
}

impl Table {
    /// Creates a table with the given header and no records.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            records: Vec::new(),
        }
    }

    /// Builds a table from a header and rows of cells aligned with it.
    /// Missing trailing cells are treated as nulls.
    pub fn from_rows<I, S>(columns: I, rows: Vec<Vec<Value>>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut table = Self::new(columns);
        for row in rows {
            let mut cells = row.into_iter();
            let record = table
                .columns
                .iter()
                .map(|column| (column.clone(), cells.next().unwrap_or(Value::Null)))
                .collect();
            table.records.push(record);
        }
        table
    }

    /// Returns `true` when the header carries `column`.
    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|name| name == column)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Values of `column` in record order; records lacking it yield `Null`.
    pub fn column_values<'a>(&'a self, column: &'a str) -> impl Iterator<Item = &'a Value> + 'a {
        self.records
            .iter()
            .map(move |record| record.get(column).unwrap_or(&NULL))
    }

    /// Cells of `record` laid out along the header, nulls for gaps.
    pub fn row_cells<'a>(&'a self, record: &'a Record) -> impl Iterator<Item = &'a Value> + 'a {
        self.columns
            .iter()
            .map(move |column| record.get(column).unwrap_or(&NULL))
    }
}
