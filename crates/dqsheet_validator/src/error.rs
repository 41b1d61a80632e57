//! Error types for rule sheet validation.

use dqsheet_core::SheetKind;
use thiserror::Error;

/// Broad category of a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Required columns or records are missing
    Schema,
    /// A `TableLevel` row points at a table with no rules
    Referential,
    /// A cell violates a flag, range or rule-type requirement
    FieldConstraint,
    /// A numeric cell is not a number
    Parse,
}

/// The first violation found in a rule sheet.
///
/// The `Display` text is the message shown to rule authors; it names the sheet and,
/// for row-level problems, the 1-based data-row number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SheetError {
    /// Required headers are absent
    #[error("{sheet} sheet is missing required columns: {}", .columns.join(", "))]
    MissingColumns {
        sheet: SheetKind,
        columns: Vec<String>,
    },

    /// The sheet has no data rows
    #[error("{0} sheet does not contain any records.")]
    NoRecords(SheetKind),

    /// Project, dataset or table cell left blank
    #[error("Missing required values in {sheet} sheet at row {row}.")]
    MissingIdentity { sheet: SheetKind, row: usize },

    /// `TableLevel` row without a matching `ColumnLevel` row
    #[error("No corresponding record in ColumnLevel sheet for TableLevel row {row}.")]
    UnmatchedTableRow { row: usize },

    /// A cell breaks a field requirement
    #[error("{message} in {sheet} sheet at row {row}.")]
    FieldConstraint {
        sheet: SheetKind,
        row: usize,
        message: String,
    },

    /// A numeric cell does not parse
    #[error("'{field}' should be a number in {sheet} sheet at row {row}.")]
    NotANumber {
        sheet: SheetKind,
        row: usize,
        field: &'static str,
    },
}

impl SheetError {
    /// Creates a missing columns error.
    pub fn missing_columns(sheet: SheetKind, columns: &[&str]) -> Self {
        Self::MissingColumns {
            sheet,
            columns: columns.iter().map(|c| c.to_string()).collect(),
        }
    }

    /// Creates a field constraint error.
    pub fn constraint(sheet: SheetKind, row: usize, message: impl Into<String>) -> Self {
        Self::FieldConstraint {
            sheet,
            row,
            message: message.into(),
        }
    }

    /// Creates a non-numeric value error.
    pub fn not_a_number(sheet: SheetKind, row: usize, field: &'static str) -> Self {
        Self::NotANumber { sheet, row, field }
    }

    /// Category of the failure.
    pub fn kind(&self) -> ErrorKind {
        match self {
            SheetError::MissingColumns { .. } | SheetError::NoRecords(_) => ErrorKind::Schema,
            SheetError::UnmatchedTableRow { .. } => ErrorKind::Referential,
            SheetError::MissingIdentity { .. } | SheetError::FieldConstraint { .. } => {
                ErrorKind::FieldConstraint
            }
            SheetError::NotANumber { .. } => ErrorKind::Parse,
        }
    }

    /// Sheet the failure was found in.
    pub fn sheet(&self) -> SheetKind {
        match self {
            SheetError::MissingColumns { sheet, .. }
            | SheetError::MissingIdentity { sheet, .. }
            | SheetError::FieldConstraint { sheet, .. }
            | SheetError::NotANumber { sheet, .. } => *sheet,
            SheetError::NoRecords(sheet) => *sheet,
            SheetError::UnmatchedTableRow { .. } => SheetKind::TableLevel,
        }
    }

    /// Data-row number, for row-level failures.
    pub fn row(&self) -> Option<usize> {
        match self {
            SheetError::MissingIdentity { row, .. }
            | SheetError::UnmatchedTableRow { row }
            | SheetError::FieldConstraint { row, .. }
            | SheetError::NotANumber { row, .. } => Some(*row),
            SheetError::MissingColumns { .. } | SheetError::NoRecords(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_messages() {
        assert_eq!(
            SheetError::missing_columns(SheetKind::ColumnLevel, &["Threshhold", "DQ Rule"])
                .to_string(),
            "ColumnLevel sheet is missing required columns: Threshhold, DQ Rule"
        );
        assert_eq!(
            SheetError::UnmatchedTableRow { row: 2 }.to_string(),
            "No corresponding record in ColumnLevel sheet for TableLevel row 2."
        );
        assert_eq!(
            SheetError::not_a_number(SheetKind::TableLevel, 1, "Data Sampling %").to_string(),
            "'Data Sampling %' should be a number in TableLevel sheet at row 1."
        );
    }

    #[test]
    fn test_kind_sheet_and_row() {
        let err = SheetError::constraint(SheetKind::ColumnLevel, 3, "bad");
        assert_eq!(err.kind(), ErrorKind::FieldConstraint);
        assert_eq!(err.sheet(), SheetKind::ColumnLevel);
        assert_eq!(err.row(), Some(3));

        let err = SheetError::NoRecords(SheetKind::ColumnLevel);
        assert_eq!(err.kind(), ErrorKind::Schema);
        assert_eq!(err.row(), None);

        assert_eq!(
            SheetError::UnmatchedTableRow { row: 1 }.kind(),
            ErrorKind::Referential
        );
    }
}
