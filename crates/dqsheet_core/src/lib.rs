//! # Data Quality Sheet Core
//!
//! Core data structures and types for compiling spreadsheet-authored data-quality rules.
//!
//! Rule authors describe, per BigQuery table and per column, which checks a quality-scanning
//! engine should run. The workbook has two sheets: `ColumnLevel` (one row per rule) and
//! `TableLevel` (one row per table with filter, sampling, schedule and export settings).
//! This crate provides the shared vocabulary used by the parser, validator and compiler crates.
//!
//! ## Key Concepts
//!
//! - **SheetTable / RuleSheet**: raw string tables as read from the workbook
//! - **RuleType**: the closed set of rule kinds and their expectation/dimension mapping
//! - **ColumnRuleRow / TableRuleRow**: typed views over validated sheet rows
//! - **CompiledTableSpec**: the per-table configuration document handed to the scanning engine
//!
//! ## Example
//!
//! ```rust
//! use dqsheet_core::{ColumnRuleBuilder, RuleSheetBuilder, TableRuleBuilder};
//!
//! let sheet = RuleSheetBuilder::new()
//!     .column_rule(
//!         ColumnRuleBuilder::new("proj", "sales", "orders")
//!             .column("order_id")
//!             .rule_type("NOT_NULL"),
//!     )
//!     .table_rule(TableRuleBuilder::new("proj", "sales", "orders").sampling_percent("50"))
//!     .build();
//!
//! assert_eq!(sheet.column_level.len(), 1);
//! assert_eq!(sheet.table_level.len(), 1);
//! ```

pub mod builder;
pub mod compiled;
pub mod config;
pub mod error;
pub mod identity;
pub mod report;
pub mod row;
pub mod rule;
pub mod sheet;

pub use builder::*;
pub use compiled::*;
pub use config::*;
pub use error::*;
pub use identity::*;
pub use report::*;
pub use row::*;
pub use rule::*;
pub use sheet::*;
