use thiserror::Error;

use crate::embedding::EmbeddingError;
use crate::model::ModelError;
use crate::registry::RegistryError;

/// A capability the evaluation depends on failed.
///
/// Diagnostics about the response itself are never errors; they end up in
/// the [`crate::model::EvaluationResult`].
#[derive(Debug, Error)]
pub enum EvaluationError {
    #[error("embedding capability failed: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("registry capability failed: {0}")]
    Registry(#[from] RegistryError),

    #[error("invalid response: {0}")]
    Model(#[from] ModelError),
}
