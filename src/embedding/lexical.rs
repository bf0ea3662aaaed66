use tracing::debug;

use super::{Embedder, EmbeddingError, normalize};
use crate::constants::LEXICAL_EMBEDDING_DIM;
use crate::hashing::feature_index;

/// Hashed bag-of-words embedder.
///
/// Each lowercase alphanumeric token adds its term frequency to one of `dim`
/// BLAKE3-selected buckets; the result is L2-normalized. Texts sharing
/// vocabulary score higher than unrelated ones, which is enough for offline
/// runs and tests.
#[derive(Debug, Clone, Copy)]
pub struct LexicalEmbedder {
    dim: usize,
}

impl Default for LexicalEmbedder {
    fn default() -> Self {
        Self::new(LEXICAL_EMBEDDING_DIM)
    }
}

impl LexicalEmbedder {
    pub fn new(dim: usize) -> Self {
        Self { dim: dim.max(1) }
    }

    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Synchronous embedding; never fails.
    pub fn embed(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dim];

        let lowered = text.to_lowercase();
        let mut tokens = 0usize;
        for token in lowered
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
        {
            vector[feature_index(token, self.dim)] += 1.0;
            tokens += 1;
        }

        debug!(text_len = text.len(), tokens, "Lexical embedding");
        normalize(vector)
    }
}

impl Embedder for LexicalEmbedder {
    async fn encode(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        Ok(self.embed(text))
    }
}
