//! Compiled rule documents.
//!
//! These types are the output of compilation and serialize directly into the nested
//! document layout the scanning engine reads. Optional values are skipped rather than
//! written as null or empty.

use crate::{Dimension, RuleType, TableIdentity};
use serde::{Serialize, Serializer};

/// One output document: the rules and settings for a single table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompiledTableSpec {
    /// Table the document configures
    #[serde(skip)]
    pub identity: TableIdentity,

    /// Output document name, e.g. `p__d__t.yaml`
    #[serde(skip)]
    pub document_name: String,

    /// Row filter applied before scanning
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_filter: Option<String>,

    /// Percentage of rows to sample
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sampling_percent: Option<Numeric>,

    /// Rules in authoring order
    pub rules: Vec<CompiledRule>,

    /// Where scan results are exported
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_scan_actions: Option<PostScanActions>,
}

/// Actions run after a scan completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostScanActions {
    /// Export of results to BigQuery
    pub bigquery_export: BigQueryExport,
}

/// BigQuery export settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BigQueryExport {
    /// Resource path of the results table
    pub results_table: String,
}

impl PostScanActions {
    /// Export to the given results table path.
    pub fn export_to(results_table: impl Into<String>) -> Self {
        Self {
            bigquery_export: BigQueryExport {
                results_table: results_table.into(),
            },
        }
    }
}

/// A single compiled rule: a common envelope plus the rule-specific block.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompiledRule {
    /// Rule-specific settings, rendered under the expectation-kind key
    #[serde(flatten)]
    pub expectation: Expectation,

    /// Quality dimension
    pub dimension: Dimension,

    /// Column checked
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,

    /// Rule name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Rule description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Passing ratio
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<Numeric>,

    /// Whether nulls are ignored
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignore_null: Option<bool>,
}

/// Rule-specific settings, one variant per rule type.
///
/// Each variant only carries the fields its rule type uses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Expectation {
    #[serde(rename = "nonNullExpectation")]
    NonNull(NoFields),

    #[serde(rename = "rangeExpectation")]
    Range(RangeExpectation),

    #[serde(rename = "uniquenessExpectation")]
    Uniqueness(NoFields),

    #[serde(rename = "rowConditionExpectation")]
    RowCondition(SqlExpression),

    #[serde(rename = "regexExpectation")]
    Regex(RegexExpectation),

    #[serde(rename = "setExpectation")]
    Set(SetExpectation),

    #[serde(rename = "tableConditionExpectation")]
    TableCondition(SqlExpression),

    #[serde(rename = "sqlAssertion")]
    SqlAssertion(SqlStatement),
}

impl Expectation {
    /// Rule type the variant belongs to.
    pub fn rule_type(&self) -> RuleType {
        match self {
            Expectation::NonNull(_) => RuleType::NotNull,
            Expectation::Range(_) => RuleType::Range,
            Expectation::Uniqueness(_) => RuleType::Unique,
            Expectation::RowCondition(_) => RuleType::SqlRow,
            Expectation::Regex(_) => RuleType::Regex,
            Expectation::Set(_) => RuleType::Set,
            Expectation::TableCondition(_) => RuleType::SqlTable,
            Expectation::SqlAssertion(_) => RuleType::SqlAssert,
        }
    }

    /// Output key of the variant.
    pub fn kind(&self) -> &'static str {
        self.rule_type().expectation_kind()
    }
}

/// Settings block with no fields; renders as an empty mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NoFields {}

/// Range bounds.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeExpectation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_value: Option<Bound>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_value: Option<Bound>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub strict_min_enabled: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub strict_max_enabled: Option<bool>,
}

/// SQL condition for row and table condition rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SqlExpression {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sql_expression: Option<String>,
}

/// SQL statement for assertion rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SqlStatement {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sql_statement: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RegexExpectation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regex: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SetExpectation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<String>>,
}

/// A range bound: cells holding a plain number render as numbers, anything else (dates,
/// timestamps, zero-padded codes) as the authored text.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Bound {
    Integer(i64),
    Number(Numeric),
    Text(String),
}

impl Bound {
    /// Reads a bound from trimmed cell text.
    ///
    /// A number is only taken when printing it back gives the same text, so the scan
    /// engine always receives the value as authored.
    pub fn parse(text: &str) -> Self {
        if let Ok(integer) = text.parse::<i64>() {
            if integer.to_string() == text {
                return Bound::Integer(integer);
            }
        }
        match text.parse::<f64>() {
            Ok(value) if value.is_finite() && value.fract() != 0.0 && value.to_string() == text => {
                Bound::Number(Numeric(value))
            }
            _ => Bound::Text(text.to_string()),
        }
    }
}

impl From<&str> for Bound {
    fn from(text: &str) -> Self {
        Self::parse(text)
    }
}

/// A sheet number that renders integral values without a fractional part.
///
/// `50` stays `50` rather than becoming `50.0`; `0.95` renders as is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Numeric(pub f64);

impl Numeric {
    fn as_integer(self) -> Option<i64> {
        const MAX_EXACT: f64 = 9_007_199_254_740_992.0;
        (self.0.is_finite() && self.0.fract() == 0.0 && self.0.abs() <= MAX_EXACT)
            .then_some(self.0 as i64)
    }
}

impl Serialize for Numeric {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.as_integer() {
            Some(integer) => serializer.serialize_i64(integer),
            None => serializer.serialize_f64(self.0),
        }
    }
}
