//! # Data Quality Sheet SDK
//!
//! Public API for turning folders of rule workbooks into data-quality scan documents.
//!
//! The [`Pipeline`] lists a folder through an [`ObjectStore`], validates every workbook in
//! it and writes one YAML document per table. [`LocalStore`] works on a directory tree and
//! [`MemoryStore`] keeps everything in process.
//!
//! ## Example
//!
//! ```rust,no_run
//! use dqsheet_core::RunConfig;
//! use dqsheet_sdk::{LocalStore, Pipeline};
//!
//! let config = RunConfig::new("dq_excel").with_output_prefix("dq_yaml");
//! let pipeline = Pipeline::new(LocalStore::new("."), config);
//!
//! let summary = pipeline.run()?;
//! for outcome in &summary.outcomes {
//!     println!("{}: {}", outcome.object, outcome.report.message);
//! }
//! # Ok::<(), dqsheet_sdk::PipelineError>(())
//! ```

mod pipeline;
mod storage;

pub use pipeline::*;
pub use storage::*;

pub use dqsheet_compiler::{RenderedDocument, RuleCompiler, render_documents, render_yaml};
pub use dqsheet_core::{RuleSheet, RunConfig, ValidationReport};
pub use dqsheet_parser::{ParserError, parse_config_file, read_workbook, read_workbook_file};
pub use dqsheet_validator::{RuleSheetValidator, SheetError};
