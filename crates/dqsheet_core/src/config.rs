//! Run configuration for the directory driver.

use serde::{Deserialize, Serialize};

fn default_extensions() -> Vec<String> {
    vec!["xlsx".to_string()]
}

/// Where to find rule workbooks and where to write compiled documents.
///
/// All fields have defaults so a config file only needs to name what differs.
///
/// # Example
///
/// ```rust
/// use dqsheet_core::RunConfig;
///
/// let config = RunConfig::new("dq_excel/");
/// assert_eq!(config.output_prefix(), "dq_excel/");
/// assert!(config.is_candidate("dq_excel/orders.XLSX"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Logical folder holding the workbooks
    pub input_prefix: String,

    /// Logical folder for compiled documents; defaults to the input folder
    pub output_prefix: Option<String>,

    /// Workbook file extensions to pick up (without the dot, any case)
    pub extensions: Vec<String>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            input_prefix: String::new(),
            output_prefix: None,
            extensions: default_extensions(),
        }
    }
}

impl RunConfig {
    /// Creates a configuration reading from `input_prefix`.
    pub fn new(input_prefix: impl Into<String>) -> Self {
        Self {
            input_prefix: input_prefix.into(),
            ..Default::default()
        }
    }

    /// Sets the output folder.
    pub fn with_output_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.output_prefix = Some(prefix.into());
        self
    }

    /// Output folder, falling back to the input folder.
    pub fn output_prefix(&self) -> &str {
        self.output_prefix.as_deref().unwrap_or(&self.input_prefix)
    }

    /// Returns true if the object name has one of the workbook extensions.
    pub fn is_candidate(&self, object_name: &str) -> bool {
        let Some((_, extension)) = object_name.rsplit_once('.') else {
            return false;
        };
        self.extensions
            .iter()
            .any(|wanted| wanted.trim_start_matches('.').eq_ignore_ascii_case(extension))
    }

    /// Object name for an output document.
    pub fn output_object(&self, document_name: &str) -> String {
        join_object_path(self.output_prefix(), document_name)
    }
}

/// Joins a folder prefix and a name with exactly one `/` between them.
pub fn join_object_path(prefix: &str, name: &str) -> String {
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}/{name}")
    }
}
