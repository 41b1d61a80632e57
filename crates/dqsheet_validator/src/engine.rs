//! Main validation engine.
//!
//! This module provides the `RuleSheetValidator` that runs the schema, referential and
//! per-row checks over both sheets and stops at the first violation.

use crate::{ReferenceValidator, RuleValidator, SheetError, schema};
use dqsheet_core::{
    ColumnRuleRow, RuleSheet, SheetTable, TableRuleRow, ValidationReport, ValidationStats,
};
use std::time::Instant;
use tracing::{debug, info};

/// Rows of a rule sheet that passed every check, in sheet order.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedSheet {
    /// Typed `ColumnLevel` rows
    pub column_rows: Vec<ColumnRuleRow>,

    /// Typed `TableLevel` rows
    pub table_rows: Vec<TableRuleRow>,
}

/// Main validation engine for rule sheets.
///
/// # Example
///
/// ```rust
/// use dqsheet_core::{ColumnRuleBuilder, RuleSheetBuilder};
/// use dqsheet_validator::RuleSheetValidator;
///
/// let sheet = RuleSheetBuilder::new()
///     .column_rule(
///         ColumnRuleBuilder::new("p", "d", "t")
///             .column("id")
///             .rule_type("NOT_NULL")
///             .ignore_null("TRUE"),
///     )
///     .build();
///
/// let report = RuleSheetValidator::new().validate(&sheet);
/// assert!(!report.passed);
/// assert!(report.message.contains("NOT_NULL"));
/// ```
pub struct RuleSheetValidator {
    references: ReferenceValidator,
    rules: RuleValidator,
}

impl RuleSheetValidator {
    /// Creates a new rule sheet validator.
    pub fn new() -> Self {
        Self {
            references: ReferenceValidator::new(),
            rules: RuleValidator::new(),
        }
    }

    /// Checks a rule sheet and returns its typed rows.
    pub fn check(&self, sheet: &RuleSheet) -> Result<ValidatedSheet, SheetError> {
        self.check_tables(&sheet.column_level, &sheet.table_level)
    }

    /// Checks both sheets in reporting order.
    ///
    /// # Errors
    ///
    /// Returns the first violation found. Header and emptiness problems come first, then
    /// row identities, then cross-sheet references, then the cells of each row.
    pub fn check_tables(
        &self,
        column_level: &SheetTable,
        table_level: &SheetTable,
    ) -> Result<ValidatedSheet, SheetError> {
        schema::check_structure(column_level, table_level)?;
        self.references.check(column_level, table_level)?;

        let mut column_rows = Vec::with_capacity(column_level.len());
        for record in column_level.records() {
            self.rules.check_column_row(&record)?;
            column_rows.extend(ColumnRuleRow::from_record(&record));
        }

        let mut table_rows = Vec::with_capacity(table_level.len());
        for record in table_level.records() {
            self.rules.check_table_row(&record)?;
            table_rows.push(TableRuleRow::from_record(&record));
        }

        Ok(ValidatedSheet {
            column_rows,
            table_rows,
        })
    }

    /// Validates a rule sheet into a report.
    pub fn validate(&self, sheet: &RuleSheet) -> ValidationReport {
        self.validate_rows(sheet).0
    }

    /// Validates a rule sheet, returning the report and, when it passed, the typed rows.
    pub fn validate_rows(&self, sheet: &RuleSheet) -> (ValidationReport, Option<ValidatedSheet>) {
        let start = Instant::now();
        let result = self.check(sheet);
        let stats = ValidationStats {
            column_rows: sheet.column_level.len(),
            table_rows: sheet.table_level.len(),
            duration_ms: start.elapsed().as_millis() as u64,
        };

        match result {
            Ok(validated) => {
                info!(
                    column_rows = validated.column_rows.len(),
                    table_rows = validated.table_rows.len(),
                    "Rule sheet is valid"
                );
                (ValidationReport::success(stats), Some(validated))
            }
            Err(err) => {
                debug!(kind = ?err.kind(), row = ?err.row(), "Rule sheet is invalid");
                (ValidationReport::failure(err.to_string()).with_stats(stats), None)
            }
        }
    }
}

impl Default for RuleSheetValidator {
    fn default() -> Self {
        Self::new()
    }
}

/// Validates two sheet tables, returning `(ok, message)`.
///
/// The message is `"valid"` on success, otherwise the first violation.
pub fn validate(column_level: &SheetTable, table_level: &SheetTable) -> (bool, String) {
    match RuleSheetValidator::new().check_tables(column_level, table_level) {
        Ok(_) => ValidationReport::success(ValidationStats::default()).into_parts(),
        Err(err) => ValidationReport::failure(err.to_string()).into_parts(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dqsheet_core::{
        ColumnRuleBuilder, RuleSheetBuilder, RuleType, SheetKind, TableRuleBuilder, TriState,
    };
    use pretty_assertions::assert_eq;

    fn valid_sheet() -> RuleSheet {
        RuleSheetBuilder::new()
            .column_rule(
                ColumnRuleBuilder::new("p", "d", "t")
                    .column("amount")
                    .rule_type("RANGE")
                    .min_value("0")
                    .max_value("100")
                    .strict_min("TRUE"),
            )
            .column_rule(
                ColumnRuleBuilder::new("p", "d", "t")
                    .column("id")
                    .rule_type("unique")
                    .ignore_null("false"),
            )
            .table_rule(
                TableRuleBuilder::new("p", "d", "t")
                    .sampling_percent("50")
                    .schedule("0 * * * *"),
            )
            .build()
    }

    #[test]
    fn test_valid_sheet() {
        let validated = RuleSheetValidator::new().check(&valid_sheet()).unwrap();

        assert_eq!(validated.column_rows.len(), 2);
        assert_eq!(validated.column_rows[0].rule_type, RuleType::Range);
        assert_eq!(validated.column_rows[0].strict_min, TriState::True);
        assert_eq!(validated.column_rows[1].ignore_null, TriState::False);
        assert_eq!(validated.table_rows.len(), 1);
        assert_eq!(validated.table_rows[0].sampling_percent, Some(50.0));
    }

    #[test]
    fn test_validate_report() {
        let report = RuleSheetValidator::new().validate(&valid_sheet());
        assert!(report.passed);
        assert_eq!(report.message, "valid");
        assert_eq!(report.stats.column_rows, 2);
        assert_eq!(report.stats.table_rows, 1);
    }

    #[test]
    fn test_empty_column_level() {
        let sheet = RuleSheetBuilder::new()
            .table_rule(TableRuleBuilder::new("p", "d", "t"))
            .build();

        let err = RuleSheetValidator::new().check(&sheet).unwrap_err();
        assert_eq!(err, SheetError::NoRecords(SheetKind::ColumnLevel));
    }

    #[test]
    fn test_headers_checked_before_rows() {
        let mut sheet = RuleSheetBuilder::new().build();
        sheet.table_level = SheetTable::new(SheetKind::TableLevel, ["GCP Project ID"]);

        let (ok, message) = validate(&sheet.column_level, &sheet.table_level);
        assert!(!ok);
        assert!(message.starts_with("TableLevel sheet is missing required columns: "));
    }

    #[test]
    fn test_identity_checked_before_references() {
        let sheet = RuleSheetBuilder::new()
            .column_rule(ColumnRuleBuilder::new("p", "d", "t").rule_type("UNIQUE"))
            .table_rule(TableRuleBuilder::new("p", "d", ""))
            .build();

        let (_, message) = validate(&sheet.column_level, &sheet.table_level);
        assert_eq!(message, "Missing required values in TableLevel sheet at row 1.");
    }

    #[test]
    fn test_references_checked_before_cells() {
        let sheet = RuleSheetBuilder::new()
            .column_rule(ColumnRuleBuilder::new("p", "d", "t").rule_type("BOGUS"))
            .table_rule(TableRuleBuilder::new("p", "d", "x"))
            .build();

        let (_, message) = validate(&sheet.column_level, &sheet.table_level);
        assert_eq!(
            message,
            "No corresponding record in ColumnLevel sheet for TableLevel row 1."
        );
    }

    #[test]
    fn test_first_failing_row_wins() {
        let sheet = RuleSheetBuilder::new()
            .column_rule(ColumnRuleBuilder::new("p", "d", "t").rule_type("UNIQUE"))
            .column_rule(ColumnRuleBuilder::new("p", "d", "t").rule_type("SET"))
            .column_rule(ColumnRuleBuilder::new("p", "d", "t").rule_type("REGEX"))
            .build();

        let report = RuleSheetValidator::new().validate(&sheet);
        assert!(!report.passed);
        assert_eq!(
            report.message,
            "'Set Values' should not be empty when 'DQ Rule' is SET in ColumnLevel sheet at row 2."
        );
    }

    #[test]
    fn test_column_rows_checked_before_table_rows() {
        let sheet = RuleSheetBuilder::new()
            .column_rule(ColumnRuleBuilder::new("p", "d", "t").rule_type("RANGE"))
            .table_rule(TableRuleBuilder::new("p", "d", "t").sampling_percent("500"))
            .build();

        let err = RuleSheetValidator::new().check(&sheet).unwrap_err();
        assert_eq!(err.sheet(), SheetKind::ColumnLevel);
    }
}
