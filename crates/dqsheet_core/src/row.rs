//! Typed rule sheet rows.
//!
//! The constructors here are lenient: a malformed flag reads as unset and a malformed number
//! reads as absent. The validator rejects such rows before they get this far; the leniency only
//! matters for best-effort compilation of sheets that were never validated.

use crate::{ExportDestination, Record, RuleType, TableIdentity, TriState, headers};

/// One row of the `ColumnLevel` sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnRuleRow {
    /// 1-based data-row number in the sheet
    pub row: usize,

    /// Table the rule applies to
    pub identity: TableIdentity,

    /// Column the rule checks
    pub column: Option<String>,

    /// Rule name
    pub name: Option<String>,

    /// Rule description
    pub description: Option<String>,

    /// Kind of check
    pub rule_type: RuleType,

    /// Whether nulls are ignored by the check
    pub ignore_null: TriState,

    /// Passing ratio in `[0, 1]`
    pub threshold: Option<f64>,

    /// Lower bound, as authored
    pub min_value: Option<String>,

    /// Upper bound, as authored
    pub max_value: Option<String>,

    /// Whether the lower bound is exclusive
    pub strict_min: TriState,

    /// Whether the upper bound is exclusive
    pub strict_max: TriState,

    /// Allowed values, comma separated
    pub set_values: Option<String>,

    /// Regular expression values must match
    pub regex: Option<String>,

    /// SQL condition or statement
    pub sql_expression: Option<String>,
}

impl ColumnRuleRow {
    /// Reads a `ColumnLevel` record.
    ///
    /// Returns `None` when the `DQ Rule` cell does not name a known rule type.
    pub fn from_record(record: &Record<'_>) -> Option<Self> {
        let rule_type = record.raw(headers::DQ_RULE).parse::<RuleType>().ok()?;

        Some(Self {
            row: record.number(),
            identity: TableIdentity::from_record(record),
            column: owned(record, headers::COLUMN_NAME),
            name: owned(record, headers::RULE_NAME),
            description: owned(record, headers::RULE_DESCRIPTION),
            rule_type,
            ignore_null: flag(record, headers::IGNORE_NULL),
            threshold: number(record, headers::THRESHOLD),
            min_value: owned(record, headers::RANGE_MIN),
            max_value: owned(record, headers::RANGE_MAX),
            strict_min: flag(record, headers::STRICT_MIN),
            strict_max: flag(record, headers::STRICT_MAX),
            set_values: owned(record, headers::SET_VALUES),
            regex: owned(record, headers::REGEX),
            sql_expression: owned(record, headers::SQL_EXPRESSION),
        })
    }

    /// Allowed values split on commas, as authored.
    pub fn set_value_list(&self) -> Option<Vec<String>> {
        self.set_values
            .as_deref()
            .map(|values| values.split(',').map(String::from).collect())
    }
}

/// One row of the `TableLevel` sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRuleRow {
    /// 1-based data-row number in the sheet
    pub row: usize,

    /// Table the settings apply to
    pub identity: TableIdentity,

    /// Row filter (typically a partition condition)
    pub row_filter: Option<String>,

    /// Percentage of rows to sample, in `[0, 100]`
    pub sampling_percent: Option<f64>,

    /// Schedule descriptor; only used to name the output document
    pub schedule: Option<String>,

    /// Export project id
    pub export_project: Option<String>,

    /// Export dataset id
    pub export_dataset: Option<String>,

    /// Export table name
    pub export_table: Option<String>,
}

impl TableRuleRow {
    /// Reads a `TableLevel` record.
    pub fn from_record(record: &Record<'_>) -> Self {
        Self {
            row: record.number(),
            identity: TableIdentity::from_record(record),
            row_filter: owned(record, headers::ROW_FILTER),
            sampling_percent: number(record, headers::SAMPLING_PERCENT),
            schedule: owned(record, headers::SCHEDULE),
            export_project: owned(record, headers::EXPORT_PROJECT_ID),
            export_dataset: owned(record, headers::EXPORT_DATASET_ID),
            export_table: owned(record, headers::EXPORT_TABLE_NAME),
        }
    }

    /// Export destination, present only when all three export cells are filled.
    pub fn export_destination(&self) -> Option<ExportDestination> {
        ExportDestination::from_parts(
            self.export_project.as_deref(),
            self.export_dataset.as_deref(),
            self.export_table.as_deref(),
        )
    }
}

fn owned(record: &Record<'_>, header: &str) -> Option<String> {
    record.text(header).map(String::from)
}

fn flag(record: &Record<'_>, header: &str) -> TriState {
    record.raw(header).parse().unwrap_or_default()
}

fn number(record: &Record<'_>, header: &str) -> Option<f64> {
    record.text(header).and_then(|value| value.parse().ok())
}
