//! Schema validation logic.
//!
//! Checks that each sheet exposes the template headers, that the `ColumnLevel` sheet has
//! rows at all, and that every row names the table it belongs to.

use crate::SheetError;
use dqsheet_core::{SheetTable, TableIdentity};

/// Validates sheet structure and row identities.
pub struct SchemaValidator;

impl SchemaValidator {
    /// Creates a new schema validator.
    pub fn new() -> Self {
        Self
    }

    /// Fails if any template header is absent from the sheet.
    pub fn check_headers(&self, table: &SheetTable) -> Result<(), SheetError> {
        let missing = table.missing_headers();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(SheetError::missing_columns(table.kind, &missing))
        }
    }

    /// Fails if the sheet has no data rows.
    pub fn check_not_empty(&self, table: &SheetTable) -> Result<(), SheetError> {
        if table.is_empty() {
            Err(SheetError::NoRecords(table.kind))
        } else {
            Ok(())
        }
    }

    /// Fails on the first row with a blank project, dataset or table cell.
    pub fn check_identities(&self, table: &SheetTable) -> Result<(), SheetError> {
        match table
            .records()
            .find(|record| TableIdentity::from_record(record).is_incomplete())
        {
            Some(record) => Err(SheetError::MissingIdentity {
                sheet: table.kind,
                row: record.number(),
            }),
            None => Ok(()),
        }
    }
}

impl Default for SchemaValidator {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs the structural checks on both sheets, in reporting order.
pub(crate) fn check_structure(
    column_level: &SheetTable,
    table_level: &SheetTable,
) -> Result<(), SheetError> {
    let schema = SchemaValidator::new();

    schema.check_headers(column_level)?;
    schema.check_headers(table_level)?;
    schema.check_not_empty(column_level)?;
    schema.check_identities(column_level)?;
    schema.check_identities(table_level)?;

    Ok(())
}
