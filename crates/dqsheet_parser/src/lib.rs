//! Parsers for rule workbooks and run configuration.
//!
//! This crate reads the two rule sheets out of a spreadsheet workbook into plain string
//! tables, and loads the directory driver's [`RunConfig`] from YAML or TOML files.
//!
//! # Example
//!
//! ```rust
//! use dqsheet_parser::parse_config_yaml;
//!
//! let yaml = r#"
//! input_prefix: dq_excel/
//! output_prefix: dq_yaml/
//! "#;
//!
//! let config = parse_config_yaml(yaml).expect("Failed to parse config");
//! assert_eq!(config.output_prefix(), "dq_yaml/");
//! assert_eq!(config.extensions, vec!["xlsx"]);
//! ```

mod workbook;

pub use workbook::*;

use dqsheet_core::RunConfig;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while reading workbooks or configuration files.
#[derive(Debug, Error)]
pub enum ParserError {
    /// The workbook bytes could not be opened or a sheet could not be read
    #[error("Error loading Excel file: {0}")]
    Workbook(String),

    /// One or both rule sheets are absent
    #[error("Required sheets are missing: {}", .0.join(", "))]
    MissingSheets(Vec<String>),

    /// YAML parsing or deserialization failed
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml_ng::Error),

    /// TOML parsing or deserialization failed
    #[error("Failed to parse TOML: {0}")]
    TomlError(String),

    /// File I/O error
    #[error("File I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Unsupported file format
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Invalid file extension
    #[error("Invalid or missing file extension")]
    InvalidExtension,
}

/// Result type alias for parser operations.
pub type Result<T> = std::result::Result<T, ParserError>;

/// Supported configuration file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// YAML format (.yml, .yaml)
    Yaml,
    /// TOML format (.toml)
    Toml,
}

/// Parse a run configuration from a YAML string.
pub fn parse_config_yaml(content: &str) -> Result<RunConfig> {
    let config: RunConfig = serde_yaml_ng::from_str(content)?;
    Ok(config)
}

/// Parse a run configuration from a TOML string.
///
/// # Example
///
/// ```rust
/// use dqsheet_parser::parse_config_toml;
///
/// let toml = r#"
/// input_prefix = "dq_excel"
/// extensions = ["xlsx", "ods"]
/// "#;
///
/// let config = parse_config_toml(toml).unwrap();
/// assert_eq!(config.input_prefix, "dq_excel");
/// assert!(config.is_candidate("dq_excel/rules.ods"));
/// ```
pub fn parse_config_toml(content: &str) -> Result<RunConfig> {
    let config: RunConfig =
        toml::from_str(content).map_err(|e| ParserError::TomlError(e.to_string()))?;
    Ok(config)
}

/// Detect the configuration format from a file path based on its extension.
///
/// # Supported Extensions
///
/// * `.yaml`, `.yml` → `ConfigFormat::Yaml`
/// * `.toml` → `ConfigFormat::Toml`
///
/// # Errors
///
/// Returns `ParserError::InvalidExtension` if the file has no extension.
/// Returns `ParserError::UnsupportedFormat` if the extension is not recognized.
pub fn detect_format(path: &Path) -> Result<ConfigFormat> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or(ParserError::InvalidExtension)?;

    match extension.to_lowercase().as_str() {
        "yaml" | "yml" => Ok(ConfigFormat::Yaml),
        "toml" => Ok(ConfigFormat::Toml),
        other => Err(ParserError::UnsupportedFormat(other.to_string())),
    }
}

/// Parse a run configuration file with automatic format detection.
///
/// ```no_run
/// use dqsheet_parser::parse_config_file;
/// use std::path::Path;
///
/// let config = parse_config_file(Path::new("dqsheet.toml")).unwrap();
/// println!("Reading workbooks from {}", config.input_prefix);
/// ```
pub fn parse_config_file(path: &Path) -> Result<RunConfig> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;

    match format {
        ConfigFormat::Yaml => parse_config_yaml(&content),
        ConfigFormat::Toml => parse_config_toml(&content),
    }
}
