//! Error types for the provider.

use std::path::PathBuf;

use gtm_export_model::ModelError;
use thiserror::Error;

/// Errors raised while loading an export or building a selector.
///
/// Lookup misses are not errors; queries return `None` or an empty list.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The export file could not be read.
    #[error("export source unavailable: {path}: {source}")]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The source is larger than `ProviderOptions::max_source_bytes`.
    #[error("export source too large: {size} bytes (limit {limit})")]
    SourceTooLarge { size: u64, limit: u64 },

    /// The document could not be normalized.
    #[error(transparent)]
    MalformedDocument(#[from] ModelError),

    /// A selector of the wrong kind was supplied.
    #[error("invalid selector: {0}")]
    InvalidSelector(String),
}

/// Result type for provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;
