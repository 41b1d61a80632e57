//! Error types for rendering compiled documents.

use thiserror::Error;

/// Result type for rendering operations.
pub type Result<T> = std::result::Result<T, RenderError>;

/// Errors raised while turning a compiled spec into document text.
#[derive(Debug, Error)]
pub enum RenderError {
    /// YAML serialization failed
    #[error("Failed to render {document}: {source}")]
    Yaml {
        document: String,
        #[source]
        source: serde_yaml_ng::Error,
    },
}
