use thiserror::Error;

/// Failures of the embedding capability.
///
/// These never become a score; they abort the evaluation that triggered them.
#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("embedding call timed out after {ms}ms")]
    Timeout { ms: u64 },

    #[error("embedding request failed: {reason}")]
    RequestFailed { reason: String },

    #[error("invalid embedding response: {reason}")]
    InvalidResponse { reason: String },

    #[error("embedding backend unavailable: {reason}")]
    Unavailable { reason: String },
}

impl From<reqwest::Error> for EmbeddingError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            EmbeddingError::InvalidResponse {
                reason: err.to_string(),
            }
        } else {
            EmbeddingError::RequestFailed {
                reason: err.to_string(),
            }
        }
    }
}
