//! Cross-sheet referential checks.

use crate::SheetError;
use dqsheet_core::{SheetTable, TableIdentity};
use std::collections::HashSet;

/// Ensures every `TableLevel` row configures a table that has at least one rule.
pub struct ReferenceValidator;

impl ReferenceValidator {
    /// Creates a new reference validator.
    pub fn new() -> Self {
        Self
    }

    /// Fails on the first `TableLevel` row whose identity has no `ColumnLevel` row.
    pub fn check(
        &self,
        column_level: &SheetTable,
        table_level: &SheetTable,
    ) -> Result<(), SheetError> {
        let ruled: HashSet<TableIdentity> = column_level
            .records()
            .map(|record| TableIdentity::from_record(&record))
            .collect();

        for record in table_level.records() {
            if !ruled.contains(&TableIdentity::from_record(&record)) {
                return Err(SheetError::UnmatchedTableRow {
                    row: record.number(),
                });
            }
        }

        Ok(())
    }
}

impl Default for ReferenceValidator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dqsheet_core::{ColumnRuleBuilder, RuleSheetBuilder, TableRuleBuilder};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_matching_rows_pass() {
        let sheet = RuleSheetBuilder::new()
            .column_rule(ColumnRuleBuilder::new("p", "d", "t").rule_type("UNIQUE"))
            .table_rule(TableRuleBuilder::new("p", "d", "t"))
            .build();

        assert!(
            ReferenceValidator::new()
                .check(&sheet.column_level, &sheet.table_level)
                .is_ok()
        );
    }

    #[test]
    fn test_unmatched_row_is_reported() {
        let sheet = RuleSheetBuilder::new()
            .column_rule(ColumnRuleBuilder::new("p", "d", "t").rule_type("UNIQUE"))
            .table_rule(TableRuleBuilder::new("p", "d", "t"))
            .table_rule(TableRuleBuilder::new("p", "d", "other"))
            .build();

        let err = ReferenceValidator::new()
            .check(&sheet.column_level, &sheet.table_level)
            .unwrap_err();
        assert_eq!(err, SheetError::UnmatchedTableRow { row: 2 });
    }

    #[test]
    fn test_identity_match_ignores_surrounding_spaces() {
        let sheet = RuleSheetBuilder::new()
            .column_rule(ColumnRuleBuilder::new("p", "d", "t ").rule_type("UNIQUE"))
            .table_rule(TableRuleBuilder::new(" p", "d", "t"))
            .build();

        assert!(
            ReferenceValidator::new()
                .check(&sheet.column_level, &sheet.table_level)
                .is_ok()
        );
    }
}
