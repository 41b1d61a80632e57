//! # Rule Sheet Compiler
//!
//! Turns validated rule sheet rows into one data-quality scan document per BigQuery table.
//!
//! Each document lists the table's rules in authoring order, each under the key of its
//! expectation kind, plus the optional row filter, sampling percentage and results export.
//! Blank cells never show up in the output as empty or null values.
//!
//! ## Example
//!
//! ```rust
//! use dqsheet_compiler::{RuleCompiler, render_documents};
//! use dqsheet_core::{ColumnRuleBuilder, RuleSheetBuilder, TableRuleBuilder};
//!
//! let sheet = RuleSheetBuilder::new()
//!     .column_rule(ColumnRuleBuilder::new("p", "d", "t").column("id").rule_type("NOT_NULL"))
//!     .table_rule(TableRuleBuilder::new("p", "d", "t").sampling_percent("50"))
//!     .build();
//!
//! let compiled = RuleCompiler::new().compile_sheet(&sheet);
//! let documents = render_documents(&compiled).unwrap();
//!
//! assert_eq!(documents[0].name, "p__d__t.yaml");
//! assert!(documents[0].content.starts_with("samplingPercent: 50\n"));
//! ```

mod compiler;
mod error;
mod naming;
mod render;
mod rules;

pub use compiler::*;
pub use error::*;
pub use naming::*;
pub use render::*;
pub use rules::*;
