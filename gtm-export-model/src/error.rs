//! Error types for export normalization.

use thiserror::Error;

/// Errors raised while turning an export document into the typed model.
///
/// Every variant means the document is malformed; none of them is recoverable
/// by retrying with the same input.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The input is not JSON, or a field has the wrong shape.
    #[error("malformed document: {0}")]
    MalformedDocument(String),

    /// A required section is absent or is not an object.
    #[error("malformed document: missing section `{0}`")]
    MissingSection(&'static str),

    /// `exportTime` could not be parsed as a datetime.
    #[error("malformed document: invalid export time `{value}`")]
    InvalidExportTime { value: String },
}

impl From<serde_json::Error> for ModelError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedDocument(err.to_string())
    }
}

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;
