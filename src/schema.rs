//! Column presence checks run before every linkage attempt.

use crate::error::{LinkError, Result};
use crate::linkage::LinkColumns;
use crate::model::{Table, TableRole};

/// Fails with [`LinkError::MissingColumn`] on the first column of `required`
/// that the table's header does not carry.
pub fn validate<S: AsRef<str>>(table: &Table, role: TableRole, required: &[S]) -> Result<()> {
    match required
        .iter()
        .map(AsRef::as_ref)
        .find(|column| !table.has_column(column))
    {
        Some(column) => Err(LinkError::MissingColumn {
            table: role,
            column: column.to_string(),
        }),
        None => Ok(()),
    }
}

/// Checks both tables of a linkage in a fixed order: key column in the
/// portal, key column in the catalogue, then target column in the catalogue.
pub fn validate_linkage(portal: &Table, catalogue: &Table, columns: &LinkColumns) -> Result<()> {
    validate(portal, TableRole::Portal, &[&columns.key])?;
    validate(
        catalogue,
        TableRole::Catalogue,
        &[&columns.key, &columns.target],
    )
}
