//! Error types for rule sheet values.
//!
//! These errors come from converting a single cell into a typed value. Sheet-level
//! problems (missing columns, dangling table rows, rule-type requirements) are reported
//! by the validator crate.

use thiserror::Error;

/// Error converting a cell's text into a typed value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseValueError {
    /// Text does not name one of the supported rule types
    #[error("Unknown DQ rule type: '{0}'")]
    UnknownRuleType(String),

    /// Text is not empty, TRUE or FALSE
    #[error("Invalid flag value: '{0}' (expected empty, TRUE or FALSE)")]
    InvalidFlag(String),
}
