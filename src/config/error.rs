//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

use crate::model::ModelError;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// `JURIS_WEIGHTS` could not be applied to the default weight map.
    #[error("invalid metric weights '{value}': {source}")]
    InvalidWeights {
        value: String,
        #[source]
        source: ModelError,
    },

    /// A concurrency or capacity limit was set to zero.
    #[error("{name} must be greater than zero")]
    ZeroLimit { name: &'static str },

    /// The embedding endpoint is not an http(s) URL.
    #[error("invalid embedding URL '{value}': expected http:// or https://")]
    InvalidEmbeddingUrl { value: String },

    /// Specified path does not exist on the filesystem.
    #[error("path does not exist: {path}")]
    PathNotFound { path: PathBuf },

    /// Path exists but is not a file (when a file was expected).
    #[error("path is not a file: {path}")]
    NotAFile { path: PathBuf },
}
