use std::path::PathBuf;
use thiserror::Error;

use crate::evaluator::EvaluationError;
use crate::model::ModelError;

/// Errors that stop a whole batch. Failures of single items are reported in
/// the [`super::AggregateReport`] instead.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("failed to read batch file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode batch file {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("batch item {index} is invalid: {source}")]
    InvalidItem {
        index: usize,
        #[source]
        source: ModelError,
    },

    #[error("failed to build evaluator: {0}")]
    Setup(#[from] EvaluationError),
}
