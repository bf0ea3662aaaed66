use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or querying reference data.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("failed to read reference data at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse reference data at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid reference data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("source '{locator}' has an empty article range {first}..={last}")]
    InvalidArticleRange { locator: String, first: u32, last: u32 },

    #[error("gap domain '{name}' needs a marker and at least one keyword")]
    InvalidGapDomain { name: String },

    #[error("step marker '{phrase}' cannot be compiled: {reason}")]
    InvalidMarker { phrase: String, reason: String },

    #[error("reference registry unavailable: {reason}")]
    Unavailable { reason: String },
}

pub type RegistryResult<T> = Result<T, RegistryError>;
