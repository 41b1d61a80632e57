//! Builder pattern for creating rule sheets.
//!
//! This module provides ergonomic builders for constructing rule sheets in memory
//! with the template headers, without going through a workbook file.

use crate::{RuleSheet, SheetKind, SheetTable, headers};
use std::collections::HashMap;

/// Builder for creating a `RuleSheet`.
///
/// # Example
///
/// ```rust
/// use dqsheet_core::{ColumnRuleBuilder, RuleSheetBuilder, TableRuleBuilder};
///
/// let sheet = RuleSheetBuilder::new()
///     .column_rule(
///         ColumnRuleBuilder::new("proj", "sales", "orders")
///             .column("amount")
///             .rule_type("RANGE")
///             .min_value("0")
///             .max_value("1000"),
///     )
///     .table_rule(TableRuleBuilder::new("proj", "sales", "orders").schedule("0 * * * *"))
///     .build();
///
/// assert_eq!(sheet.column_level.rows.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct RuleSheetBuilder {
    column_rules: Vec<ColumnRuleBuilder>,
    table_rules: Vec<TableRuleBuilder>,
}

impl RuleSheetBuilder {
    /// Creates an empty rule sheet builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a `ColumnLevel` row.
    pub fn column_rule(mut self, rule: ColumnRuleBuilder) -> Self {
        self.column_rules.push(rule);
        self
    }

    /// Adds a `TableLevel` row.
    pub fn table_rule(mut self, rule: TableRuleBuilder) -> Self {
        self.table_rules.push(rule);
        self
    }

    /// Builds the rule sheet with template headers on both sheets.
    pub fn build(self) -> RuleSheet {
        let mut column_level = SheetTable::with_template_headers(SheetKind::ColumnLevel);
        for rule in self.column_rules {
            column_level.push_row(rule.cells.into_row(&headers::COLUMN_LEVEL));
        }

        let mut table_level = SheetTable::with_template_headers(SheetKind::TableLevel);
        for rule in self.table_rules {
            table_level.push_row(rule.cells.into_row(&headers::TABLE_LEVEL));
        }

        RuleSheet::new(column_level, table_level)
    }
}

#[derive(Debug, Default, Clone)]
struct Cells(HashMap<&'static str, String>);

impl Cells {
    fn identity(project: String, dataset: String, table: String) -> Self {
        let mut cells = Self::default();
        cells.set(headers::PROJECT_ID, project);
        cells.set(headers::DATASET_ID, dataset);
        cells.set(headers::TABLE_NAME, table);
        cells
    }

    fn set(&mut self, header: &'static str, value: String) {
        self.0.insert(header, value);
    }

    fn into_row(mut self, order: &[&'static str]) -> Vec<String> {
        order
            .iter()
            .map(|header| self.0.remove(header).unwrap_or_default())
            .collect()
    }
}

/// Builder for one `ColumnLevel` row.
///
/// Every setter takes the cell text as an author would type it.
///
/// # Example
///
/// ```rust
/// use dqsheet_core::ColumnRuleBuilder;
///
/// let rule = ColumnRuleBuilder::new("proj", "sales", "orders")
///     .column("status")
///     .rule_type("SET")
///     .set_values("NEW,SHIPPED,DELIVERED");
/// ```
#[derive(Debug, Clone)]
pub struct ColumnRuleBuilder {
    cells: Cells,
}

impl ColumnRuleBuilder {
    /// Creates a row for the given table identity.
    pub fn new(
        project: impl Into<String>,
        dataset: impl Into<String>,
        table: impl Into<String>,
    ) -> Self {
        Self {
            cells: Cells::identity(project.into(), dataset.into(), table.into()),
        }
    }

    fn with(mut self, header: &'static str, value: impl Into<String>) -> Self {
        self.cells.set(header, value.into());
        self
    }

    /// Sets `Column Name`.
    pub fn column(self, value: impl Into<String>) -> Self {
        self.with(headers::COLUMN_NAME, value)
    }

    /// Sets `Rule Name`.
    pub fn rule_name(self, value: impl Into<String>) -> Self {
        self.with(headers::RULE_NAME, value)
    }

    /// Sets `Rule Description`.
    pub fn description(self, value: impl Into<String>) -> Self {
        self.with(headers::RULE_DESCRIPTION, value)
    }

    /// Sets `DQ Rule`.
    pub fn rule_type(self, value: impl Into<String>) -> Self {
        self.with(headers::DQ_RULE, value)
    }

    /// Sets `Ignore Null Values`.
    pub fn ignore_null(self, value: impl Into<String>) -> Self {
        self.with(headers::IGNORE_NULL, value)
    }

    /// Sets `Threshhold`.
    pub fn threshold(self, value: impl Into<String>) -> Self {
        self.with(headers::THRESHOLD, value)
    }

    /// Sets `Range Min Value`.
    pub fn min_value(self, value: impl Into<String>) -> Self {
        self.with(headers::RANGE_MIN, value)
    }

    /// Sets `Range Max Value`.
    pub fn max_value(self, value: impl Into<String>) -> Self {
        self.with(headers::RANGE_MAX, value)
    }

    /// Sets `Strict Range Min Value`.
    pub fn strict_min(self, value: impl Into<String>) -> Self {
        self.with(headers::STRICT_MIN, value)
    }

    /// Sets `Strict Range Max Value`.
    pub fn strict_max(self, value: impl Into<String>) -> Self {
        self.with(headers::STRICT_MAX, value)
    }

    /// Sets `Set Values`.
    pub fn set_values(self, value: impl Into<String>) -> Self {
        self.with(headers::SET_VALUES, value)
    }

    /// Sets `Regular Expression`.
    pub fn regex(self, value: impl Into<String>) -> Self {
        self.with(headers::REGEX, value)
    }

    /// Sets `SQL Expression`.
    pub fn sql(self, value: impl Into<String>) -> Self {
        self.with(headers::SQL_EXPRESSION, value)
    }
}

/// Builder for one `TableLevel` row.
#[derive(Debug, Clone)]
pub struct TableRuleBuilder {
    cells: Cells,
}

impl TableRuleBuilder {
    /// Creates a row for the given table identity.
    pub fn new(
        project: impl Into<String>,
        dataset: impl Into<String>,
        table: impl Into<String>,
    ) -> Self {
        Self {
            cells: Cells::identity(project.into(), dataset.into(), table.into()),
        }
    }

    fn with(mut self, header: &'static str, value: impl Into<String>) -> Self {
        self.cells.set(header, value.into());
        self
    }

    /// Sets `Partition Filter Condition`.
    pub fn row_filter(self, value: impl Into<String>) -> Self {
        self.with(headers::ROW_FILTER, value)
    }

    /// Sets `Data Sampling %`.
    pub fn sampling_percent(self, value: impl Into<String>) -> Self {
        self.with(headers::SAMPLING_PERCENT, value)
    }

    /// Sets `schedule_interval`.
    pub fn schedule(self, value: impl Into<String>) -> Self {
        self.with(headers::SCHEDULE, value)
    }

    /// Sets the three export destination cells.
    pub fn export(
        self,
        project: impl Into<String>,
        dataset: impl Into<String>,
        table: impl Into<String>,
    ) -> Self {
        self.with(headers::EXPORT_PROJECT_ID, project)
            .with(headers::EXPORT_DATASET_ID, dataset)
            .with(headers::EXPORT_TABLE_NAME, table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_builder_aligns_cells_with_headers() {
        let sheet = RuleSheetBuilder::new()
            .column_rule(
                ColumnRuleBuilder::new("p", "d", "t")
                    .column("c")
                    .rule_type("REGEX")
                    .regex("^[A-Z]+$"),
            )
            .build();

        let record = sheet.column_level.records().next().unwrap();
        assert_eq!(record.raw(headers::PROJECT_ID), "p");
        assert_eq!(record.raw(headers::COLUMN_NAME), "c");
        assert_eq!(record.raw(headers::DQ_RULE), "REGEX");
        assert_eq!(record.raw(headers::REGEX), "^[A-Z]+$");
        assert_eq!(record.raw(headers::SQL_EXPRESSION), "");
    }

    #[test]
    fn test_builder_numbers_rows() {
        let sheet = RuleSheetBuilder::new()
            .table_rule(TableRuleBuilder::new("p", "d", "t1"))
            .table_rule(TableRuleBuilder::new("p", "d", "t2"))
            .build();

        let numbers: Vec<usize> = sheet.table_level.records().map(|r| r.number()).collect();
        assert_eq!(numbers, vec![1, 2]);
        assert!(sheet.column_level.is_empty());
    }
}
