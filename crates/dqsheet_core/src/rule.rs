//! Rule kinds and flag values.
//!
//! The set of rule types is closed: every type maps to exactly one expectation kind
//! (the key the scanning engine reads) and one quality dimension.

use crate::ParseValueError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// The kind of check a `ColumnLevel` row asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleType {
    /// Column must not contain nulls
    NotNull,
    /// Column values must lie between a min and a max
    Range,
    /// Column values must be unique
    Unique,
    /// Every row must satisfy a SQL condition
    SqlRow,
    /// Column values must match a regular expression
    Regex,
    /// Column values must belong to a fixed set
    Set,
    /// The table as a whole must satisfy a SQL condition
    SqlTable,
    /// A SQL statement must return no rows
    SqlAssert,
}

impl RuleType {
    /// All rule types, in the order they are listed to rule authors.
    pub const ALL: [RuleType; 8] = [
        RuleType::NotNull,
        RuleType::Range,
        RuleType::Unique,
        RuleType::SqlRow,
        RuleType::Regex,
        RuleType::Set,
        RuleType::SqlTable,
        RuleType::SqlAssert,
    ];

    /// The spelling used in the `DQ Rule` column.
    pub fn as_str(self) -> &'static str {
        match self {
            RuleType::NotNull => "NOT_NULL",
            RuleType::Range => "RANGE",
            RuleType::Unique => "UNIQUE",
            RuleType::SqlRow => "SQL_ROW",
            RuleType::Regex => "REGEX",
            RuleType::Set => "SET",
            RuleType::SqlTable => "SQL_TABLE",
            RuleType::SqlAssert => "SQL_ASSERT",
        }
    }

    /// The output key the rule's settings are nested under.
    pub fn expectation_kind(self) -> &'static str {
        match self {
            RuleType::NotNull => "nonNullExpectation",
            RuleType::Range => "rangeExpectation",
            RuleType::Unique => "uniquenessExpectation",
            RuleType::SqlRow => "rowConditionExpectation",
            RuleType::Regex => "regexExpectation",
            RuleType::Set => "setExpectation",
            RuleType::SqlTable => "tableConditionExpectation",
            RuleType::SqlAssert => "sqlAssertion",
        }
    }

    /// The quality dimension reported for the rule.
    pub fn dimension(self) -> Dimension {
        match self {
            RuleType::NotNull => Dimension::Completeness,
            RuleType::Unique => Dimension::Uniqueness,
            RuleType::Range
            | RuleType::SqlRow
            | RuleType::Regex
            | RuleType::Set
            | RuleType::SqlTable
            | RuleType::SqlAssert => Dimension::Validity,
        }
    }

    /// Whether the rule is driven by the `SQL Expression` column.
    pub fn is_sql(self) -> bool {
        matches!(
            self,
            RuleType::SqlRow | RuleType::SqlTable | RuleType::SqlAssert
        )
    }

    /// Comma-separated list of accepted spellings, for error messages.
    pub fn expected_list() -> String {
        let names: Vec<String> = Self::ALL
            .iter()
            .map(|rule| format!("'{}'", rule.as_str()))
            .collect();
        format!("[{}]", names.join(", "))
    }
}

impl FromStr for RuleType {
    type Err = ParseValueError;

    /// Parses a rule type, ignoring surrounding whitespace and case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();
        Self::ALL
            .into_iter()
            .find(|rule| rule.as_str() == normalized)
            .ok_or_else(|| ParseValueError::UnknownRuleType(s.trim().to_string()))
    }
}

impl fmt::Display for RuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Data quality dimension a rule contributes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Dimension {
    /// Values are present
    Completeness,
    /// Values are distinct
    Uniqueness,
    /// Values conform to a rule
    Validity,
}

/// A spreadsheet flag cell: left empty, `TRUE` or `FALSE`.
///
/// Kept as three states so that "not set" survives validation and compilation
/// instead of collapsing into `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TriState {
    /// Cell left empty
    #[default]
    Unset,
    /// `TRUE` (any case)
    True,
    /// `FALSE` (any case)
    False,
}

impl TriState {
    /// Returns the flag as a boolean, or `None` when unset.
    pub fn as_bool(self) -> Option<bool> {
        match self {
            TriState::Unset => None,
            TriState::True => Some(true),
            TriState::False => Some(false),
        }
    }

    /// Returns true only for an explicit `TRUE`.
    pub fn is_true(self) -> bool {
        self == TriState::True
    }
}

impl FromStr for TriState {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Ok(TriState::Unset);
        }
        match trimmed.to_uppercase().as_str() {
            "TRUE" => Ok(TriState::True),
            "FALSE" => Ok(TriState::False),
            _ => Err(ParseValueError::InvalidFlag(trimmed.to_string())),
        }
    }
}
