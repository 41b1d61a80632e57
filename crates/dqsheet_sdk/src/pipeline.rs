//! Directory driver.
//!
//! Lists a folder, and for every workbook in it: reads the rule sheets, validates them,
//! compiles the valid ones and writes one document per table to the output folder. Each
//! workbook is processed on its own, and a failure is recorded and logged before moving on.

use crate::{ObjectStore, StorageError};
use dqsheet_compiler::{RenderError, RenderedDocument, RuleCompiler, render_documents};
use dqsheet_core::{RunConfig, ValidationReport};
use dqsheet_parser::read_workbook;
use dqsheet_validator::RuleSheetValidator;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that stop a run before any workbook is processed.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Nothing exists under the input folder
    #[error("Invalid path/location, please check")]
    InvalidLocation(String),

    /// The input location names a single object rather than a folder
    #[error("Passed path/location is not a directory/folder")]
    NotADirectory(String),

    /// The input folder has objects, but no workbooks
    #[error("Passed directory/folder does not contain any excel sheet")]
    NoWorkbooks(String),

    /// Listing the input folder failed
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Why a workbook produced no documents.
#[derive(Debug, Error)]
pub enum WorkbookError {
    /// The workbook could not be read or failed validation
    #[error("{}", .0.message)]
    Invalid(ValidationReport),

    /// The sheet is valid but a document could not be rendered
    #[error("{source}")]
    Render {
        report: ValidationReport,
        #[source]
        source: RenderError,
    },
}

/// Reads, validates, compiles and renders one workbook.
///
/// # Errors
///
/// Returns `WorkbookError::Invalid` with the failed report when the workbook cannot be read
/// or does not validate, and `WorkbookError::Render` when a document cannot be rendered.
///
/// # Example
///
/// ```rust
/// use dqsheet_sdk::{WorkbookError, process_workbook};
///
/// let err = process_workbook(b"not a workbook").unwrap_err();
/// assert!(matches!(&err, WorkbookError::Invalid(report) if !report.passed));
/// assert!(err.to_string().starts_with("Error loading Excel file"));
/// ```
pub fn process_workbook(
    bytes: &[u8],
) -> Result<(ValidationReport, Vec<RenderedDocument>), WorkbookError> {
    let sheet = read_workbook(bytes)
        .map_err(|e| WorkbookError::Invalid(ValidationReport::failure(e.to_string())))?;

    let (report, validated) = RuleSheetValidator::new().validate_rows(&sheet);
    let Some(validated) = validated else {
        return Err(WorkbookError::Invalid(report));
    };

    let compiled = RuleCompiler::new().compile(&validated.column_rows, &validated.table_rows);
    match render_documents(&compiled) {
        Ok(documents) => Ok((report, documents)),
        Err(source) => Err(WorkbookError::Render { report, source }),
    }
}

/// What happened to one workbook.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkbookOutcome {
    /// Workbook object name
    pub object: String,

    /// Validation result, including read failures
    pub report: ValidationReport,

    /// Documents written, as object names
    pub written: Vec<String>,

    /// Documents that could not be written
    pub write_errors: Vec<String>,
}

impl WorkbookOutcome {
    fn new(object: &str, report: ValidationReport) -> Self {
        Self {
            object: object.to_string(),
            report,
            written: Vec::new(),
            write_errors: Vec::new(),
        }
    }

    /// Outcome of a workbook that produced no documents.
    ///
    /// Render failures keep the passing report and are listed with the write errors.
    pub fn from_error(object: &str, error: WorkbookError) -> Self {
        match error {
            WorkbookError::Invalid(report) => Self::new(object, report),
            WorkbookError::Render { report, source } => {
                let mut outcome = Self::new(object, report);
                outcome.write_errors.push(source.to_string());
                outcome
            }
        }
    }

    /// Returns true if the workbook was valid and every document was written.
    pub fn is_success(&self) -> bool {
        self.report.passed && self.write_errors.is_empty()
    }
}

/// Results of a run, one outcome per workbook in listing order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub outcomes: Vec<WorkbookOutcome>,
}

impl RunSummary {
    /// Number of workbooks that passed validation.
    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.report.passed).count()
    }

    /// Number of workbooks that failed validation or could not be read.
    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.passed()
    }

    /// Total number of documents written.
    pub fn documents_written(&self) -> usize {
        self.outcomes.iter().map(|o| o.written.len()).sum()
    }

    /// Returns true if every workbook succeeded.
    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(WorkbookOutcome::is_success)
    }
}

/// Runs validation and compilation over a folder of workbooks.
///
/// # Example
///
/// ```rust
/// use dqsheet_core::RunConfig;
/// use dqsheet_sdk::{MemoryStore, Pipeline, PipelineError};
///
/// let pipeline = Pipeline::new(MemoryStore::new(), RunConfig::new("dq_excel"));
/// let err = pipeline.run().unwrap_err();
///
/// assert!(matches!(err, PipelineError::InvalidLocation(_)));
/// assert_eq!(err.to_string(), "Invalid path/location, please check");
/// ```
pub struct Pipeline<S> {
    store: S,
    config: RunConfig,
}

impl<S: ObjectStore> Pipeline<S> {
    /// Creates a pipeline over a store.
    pub fn new(store: S, config: RunConfig) -> Self {
        Self { store, config }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The run configuration.
    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Lists the workbooks under `prefix`.
    ///
    /// # Errors
    ///
    /// Fails when the folder is empty or missing, when the prefix names an object rather
    /// than a folder, or when the folder holds no object with a workbook extension.
    pub fn check_location(&self, prefix: &str) -> Result<Vec<String>, PipelineError> {
        let objects = match self.store.list(prefix) {
            Ok(objects) => objects,
            Err(StorageError::NotADirectory(name)) => {
                return Err(PipelineError::NotADirectory(name));
            }
            Err(err) => return Err(err.into()),
        };
        if objects.is_empty() {
            return Err(PipelineError::InvalidLocation(prefix.to_string()));
        }

        let workbooks: Vec<String> = objects
            .into_iter()
            .filter(|name| self.config.is_candidate(name))
            .collect();
        if workbooks.is_empty() {
            return Err(PipelineError::NoWorkbooks(prefix.to_string()));
        }

        debug!(prefix, workbooks = workbooks.len(), "Found workbooks");
        Ok(workbooks)
    }

    /// Processes every workbook under the configured input folder.
    pub fn run(&self) -> Result<RunSummary, PipelineError> {
        let workbooks = self.check_location(&self.config.input_prefix)?;
        info!(
            input = %self.config.input_prefix,
            output = %self.config.output_prefix(),
            workbooks = workbooks.len(),
            "Starting run"
        );

        let outcomes: Vec<WorkbookOutcome> = workbooks
            .iter()
            .map(|object| self.process_object(object))
            .collect();
        let summary = RunSummary { outcomes };

        info!(
            passed = summary.passed(),
            failed = summary.failed(),
            documents = summary.documents_written(),
            "Run finished"
        );
        Ok(summary)
    }

    fn process_object(&self, object: &str) -> WorkbookOutcome {
        info!(object, "Processing workbook");

        let bytes = match self.store.read_bytes(object) {
            Ok(bytes) => bytes,
            Err(err) => {
                warn!(object, error = %err, "Could not read workbook");
                return WorkbookOutcome::new(object, ValidationReport::failure(err.to_string()));
            }
        };

        let (report, documents) = match process_workbook(&bytes) {
            Ok(result) => result,
            Err(err) => {
                warn!(object, error = %err, "Workbook produced no documents");
                return WorkbookOutcome::from_error(object, err);
            }
        };

        let mut outcome = WorkbookOutcome::new(object, report);
        for document in documents {
            let target = self.config.output_object(&document.name);
            match self.store.write_string(&target, &document.content) {
                Ok(()) => {
                    info!(object, document = %target, "Wrote document");
                    outcome.written.push(target);
                }
                Err(err) => {
                    warn!(object, document = %target, error = %err, "Could not write document");
                    outcome.write_errors.push(err.to_string());
                }
            }
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LocalStore, MemoryStore};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_check_location_errors() {
        let pipeline = Pipeline::new(
            MemoryStore::new().with_object("dq/readme.txt", b"hi".to_vec()),
            RunConfig::new("dq"),
        );

        let err = pipeline.check_location("elsewhere").unwrap_err();
        assert_eq!(err.to_string(), "Invalid path/location, please check");

        let err = pipeline.check_location("dq").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Passed directory/folder does not contain any excel sheet"
        );
    }

    #[test]
    fn test_check_location_of_a_single_workbook() {
        let pipeline = Pipeline::new(
            MemoryStore::new().with_object("dq/rules.xlsx", vec![]),
            RunConfig::new("dq/rules.xlsx"),
        );

        let err = pipeline.run().unwrap_err();
        assert!(matches!(&err, PipelineError::NotADirectory(name) if name == "dq/rules.xlsx"));
        assert_eq!(
            err.to_string(),
            "Passed path/location is not a directory/folder"
        );
    }

    #[test]
    fn test_check_location_of_a_local_file() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("rules.xlsx"), b"x").unwrap();
        let pipeline = Pipeline::new(LocalStore::new(dir.path()), RunConfig::new("rules.xlsx"));

        assert!(matches!(
            pipeline.check_location("rules.xlsx").unwrap_err(),
            PipelineError::NotADirectory(_)
        ));
        assert!(matches!(
            pipeline.check_location("missing").unwrap_err(),
            PipelineError::InvalidLocation(_)
        ));
    }

    #[test]
    fn test_render_failure_keeps_passing_report() {
        let source = RenderError::Yaml {
            document: "p__d__t.yaml".to_string(),
            source: serde_yaml_ng::from_str::<u32>("not a number").unwrap_err(),
        };
        let report = ValidationReport::success(Default::default());

        let outcome = WorkbookOutcome::from_error(
            "dq/rules.xlsx",
            WorkbookError::Render { report, source },
        );

        assert!(outcome.report.passed);
        assert!(!outcome.is_success());
        assert_eq!(outcome.write_errors.len(), 1);
        assert!(outcome.write_errors[0].starts_with("Failed to render p__d__t.yaml"));

        let summary = RunSummary {
            outcomes: vec![outcome],
        };
        assert_eq!(summary.passed(), 1);
        assert!(!summary.is_success());
    }

    #[test]
    fn test_invalid_workbook_outcome() {
        let outcome = WorkbookOutcome::from_error(
            "dq/rules.xlsx",
            process_workbook(b"garbage").unwrap_err(),
        );

        assert!(!outcome.report.passed);
        assert!(outcome.write_errors.is_empty());
    }

    #[test]
    fn test_check_location_filters_extensions() {
        let pipeline = Pipeline::new(
            MemoryStore::new()
                .with_object("dq/a.xlsx", vec![])
                .with_object("dq/b.csv", vec![])
                .with_object("dq/c.XLSX", vec![]),
            RunConfig::new("dq"),
        );

        assert_eq!(
            pipeline.check_location("dq").unwrap(),
            vec!["dq/a.xlsx", "dq/c.XLSX"]
        );
    }

    #[test]
    fn test_unreadable_workbook_is_recorded_and_run_continues() {
        let store = MemoryStore::new()
            .with_object("dq/a.xlsx", b"garbage".to_vec())
            .with_object("dq/b.xlsx", b"more garbage".to_vec());
        let pipeline = Pipeline::new(store, RunConfig::new("dq"));

        let summary = pipeline.run().unwrap();

        assert_eq!(summary.outcomes.len(), 2);
        assert_eq!(summary.failed(), 2);
        assert!(!summary.is_success());
        for outcome in &summary.outcomes {
            assert!(outcome.report.message.starts_with("Error loading Excel file"));
            assert!(outcome.written.is_empty());
        }
    }
}
