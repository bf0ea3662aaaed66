use std::sync::Arc;

use moka::sync::Cache;
use tracing::debug;

use super::{Embedder, EmbeddingError};
use crate::hashing::hash_text;

/// Memoizes vectors from an inner embedder, keyed by BLAKE3 text hash.
///
/// Citation texts repeat across a batch; each distinct text is embedded once
/// while it stays resident.
pub struct CachedEmbedder<E> {
    inner: E,
    entries: Cache<[u8; 32], Arc<Vec<f32>>>,
}

impl<E> std::fmt::Debug for CachedEmbedder<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedEmbedder")
            .field("entries", &self.entries.entry_count())
            .finish()
    }
}

impl<E: Embedder> CachedEmbedder<E> {
    /// Creates a cache holding at most `capacity` vectors.
    pub fn new(inner: E, capacity: u64) -> Self {
        Self {
            inner,
            entries: Cache::builder().max_capacity(capacity).build(),
        }
    }

    #[inline]
    pub fn inner(&self) -> &E {
        &self.inner
    }

    /// Approximate number of cached vectors.
    pub fn entry_count(&self) -> u64 {
        self.entries.run_pending_tasks();
        self.entries.entry_count()
    }
}

impl<E: Embedder> Embedder for CachedEmbedder<E> {
    async fn encode(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let key = hash_text(text);
        if let Some(hit) = self.entries.get(&key) {
            return Ok(hit.as_ref().clone());
        }

        let vector = self.inner.encode(text).await?;
        self.entries.insert(key, Arc::new(vector.clone()));
        Ok(vector)
    }

    async fn encode_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let keys: Vec<[u8; 32]> = texts.iter().map(|t| hash_text(t)).collect();
        let mut out: Vec<Option<Vec<f32>>> = keys
            .iter()
            .map(|k| self.entries.get(k).map(|v| v.as_ref().clone()))
            .collect();

        let missing: Vec<usize> = (0..texts.len()).filter(|&i| out[i].is_none()).collect();
        debug!(
            requested = texts.len(),
            misses = missing.len(),
            "Embedding cache lookup"
        );

        if !missing.is_empty() {
            let miss_texts: Vec<&str> = missing.iter().map(|&i| texts[i]).collect();
            let vectors = self.inner.encode_batch(&miss_texts).await?;
            if vectors.len() != missing.len() {
                return Err(EmbeddingError::InvalidResponse {
                    reason: format!(
                        "expected {} embeddings, got {}",
                        missing.len(),
                        vectors.len()
                    ),
                });
            }
            for (i, vector) in missing.into_iter().zip(vectors) {
                self.entries.insert(keys[i], Arc::new(vector.clone()));
                out[i] = Some(vector);
            }
        }

        Ok(out.into_iter().flatten().collect())
    }

    fn similarity(&self, a: &[f32], b: &[f32]) -> f32 {
        self.inner.similarity(a, b)
    }
}
