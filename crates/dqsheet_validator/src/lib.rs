//! # Rule Sheet Validator
//!
//! Validation engine for data-quality rule sheets. This crate checks the `ColumnLevel`
//! and `TableLevel` sheets of a rule workbook before they are compiled, including:
//!
//! - Schema validation (required columns, non-empty rule sheet, row identities)
//! - Referential validation (every table setting has at least one rule)
//! - Field constraints (rule types, flags, thresholds, rule-type requirements)
//!
//! Validation stops at the first violation and reports it as a single message naming the
//! sheet and the 1-based data row.
//!
//! ## Example
//!
//! ```rust
//! use dqsheet_core::{ColumnRuleBuilder, RuleSheetBuilder, TableRuleBuilder};
//! use dqsheet_validator::RuleSheetValidator;
//!
//! let sheet = RuleSheetBuilder::new()
//!     .column_rule(ColumnRuleBuilder::new("p", "d", "t").column("id").rule_type("UNIQUE"))
//!     .table_rule(TableRuleBuilder::new("p", "d", "t").sampling_percent("10"))
//!     .build();
//!
//! let report = RuleSheetValidator::new().validate(&sheet);
//! assert!(report.passed);
//! assert_eq!(report.message, "valid");
//! ```

mod engine;
mod error;
mod references;
mod rules;
mod schema;

pub use engine::*;
pub use error::*;
pub use references::*;
pub use rules::*;
pub use schema::SchemaValidator;
