//! Per-row rule constraint checks.
//!
//! This module handles the cell-level requirements of both sheets:
//! - `DQ Rule` must name a known rule type
//! - flag cells must be empty, TRUE or FALSE
//! - threshold and sampling cells must be numbers within their bounds
//! - each rule type needs the cells it is driven by

use crate::SheetError;
use dqsheet_core::{Record, RuleType, TriState, headers};
use std::ops::RangeInclusive;
use tracing::trace;

/// Validates the cells of `ColumnLevel` and `TableLevel` rows.
pub struct RuleValidator;

impl RuleValidator {
    /// Creates a new rule validator.
    pub fn new() -> Self {
        Self
    }

    /// Checks one `ColumnLevel` row, stopping at the first violation.
    pub fn check_column_row(&self, record: &Record<'_>) -> Result<(), SheetError> {
        let row = RowCheck::new(record);
        trace!(row = record.number(), "Checking ColumnLevel row");

        let rule_type = record
            .raw(headers::DQ_RULE)
            .parse::<RuleType>()
            .map_err(|_| {
                row.fail(format!(
                    "'{}' should be one of {}",
                    headers::DQ_RULE,
                    RuleType::expected_list()
                ))
            })?;

        if rule_type == RuleType::NotNull && row.flag_text_is_true(headers::IGNORE_NULL) {
            return Err(row.fail(format!(
                "'{}' should not be TRUE when '{}' is {}",
                headers::IGNORE_NULL,
                headers::DQ_RULE,
                RuleType::NotNull
            )));
        }

        row.flag(headers::IGNORE_NULL)?;
        row.bounded_number(headers::THRESHOLD, 0.0..=1.0, "0-1")?;
        let strict_min = row.flag(headers::STRICT_MIN)?;
        let strict_max = row.flag(headers::STRICT_MAX)?;

        if strict_min.is_true() {
            row.require_when(headers::RANGE_MIN, headers::STRICT_MIN, "TRUE")?;
        }
        if strict_max.is_true() {
            row.require_when(headers::RANGE_MAX, headers::STRICT_MAX, "TRUE")?;
        }

        match rule_type {
            RuleType::Range => {
                if record.is_blank(headers::RANGE_MIN) || record.is_blank(headers::RANGE_MAX) {
                    return Err(row.fail(format!(
                        "'{}' and '{}' should not be empty when '{}' is {}",
                        headers::RANGE_MIN,
                        headers::RANGE_MAX,
                        headers::DQ_RULE,
                        rule_type
                    )));
                }
            }
            RuleType::Set => row.require_for(headers::SET_VALUES, rule_type)?,
            RuleType::Regex => row.require_for(headers::REGEX, rule_type)?,
            RuleType::SqlRow | RuleType::SqlTable | RuleType::SqlAssert => {
                row.require_for(headers::SQL_EXPRESSION, rule_type)?
            }
            RuleType::NotNull | RuleType::Unique => {}
        }

        Ok(())
    }

    /// Checks one `TableLevel` row.
    pub fn check_table_row(&self, record: &Record<'_>) -> Result<(), SheetError> {
        RowCheck::new(record).bounded_number(headers::SAMPLING_PERCENT, 0.0..=100.0, "0-100")?;
        Ok(())
    }
}

impl Default for RuleValidator {
    fn default() -> Self {
        Self::new()
    }
}

/// Helpers bound to the row being checked, so every error carries its sheet and row.
struct RowCheck<'r, 'a> {
    record: &'r Record<'a>,
}

impl<'r, 'a> RowCheck<'r, 'a> {
    fn new(record: &'r Record<'a>) -> Self {
        Self { record }
    }

    fn fail(&self, message: impl Into<String>) -> SheetError {
        SheetError::constraint(self.record.sheet(), self.record.number(), message)
    }

    fn flag_text_is_true(&self, header: &str) -> bool {
        self.record.raw(header).trim().eq_ignore_ascii_case("TRUE")
    }

    fn flag(&self, header: &str) -> Result<TriState, SheetError> {
        self.record.raw(header).parse::<TriState>().map_err(|_| {
            self.fail(format!("'{header}' should be empty, TRUE, or FALSE"))
        })
    }

    fn bounded_number(
        &self,
        header: &'static str,
        bounds: RangeInclusive<f64>,
        label: &str,
    ) -> Result<(), SheetError> {
        let Some(text) = self.record.text(header) else {
            return Ok(());
        };
        let value: f64 = text.parse().map_err(|_| {
            SheetError::not_a_number(self.record.sheet(), self.record.number(), header)
        })?;
        if bounds.contains(&value) {
            Ok(())
        } else {
            Err(self.fail(format!(
                "'{header}' should be within the range of {label}"
            )))
        }
    }

    fn require_when(&self, header: &str, flag: &str, value: &str) -> Result<(), SheetError> {
        if self.record.is_blank(header) {
            Err(self.fail(format!(
                "'{header}' should not be empty when '{flag}' is {value}"
            )))
        } else {
            Ok(())
        }
    }

    fn require_for(&self, header: &str, rule_type: RuleType) -> Result<(), SheetError> {
        self.require_when(header, headers::DQ_RULE, rule_type.as_str())
    }
}
