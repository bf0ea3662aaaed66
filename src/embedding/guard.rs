use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tracing::warn;

use super::{Embedder, EmbeddingError};
use crate::config::Config;

/// Bounds in-flight calls to an inner embedder and times each one out.
///
/// Waiting for a permit is not timed; only the inner call is.
#[derive(Debug)]
pub struct GuardedEmbedder<E> {
    inner: E,
    permits: Arc<Semaphore>,
    timeout: Duration,
}

impl<E: Embedder> GuardedEmbedder<E> {
    pub fn new(inner: E, max_in_flight: usize, timeout: Duration) -> Self {
        Self {
            inner,
            permits: Arc::new(Semaphore::new(max_in_flight.max(1))),
            timeout,
        }
    }

    pub fn from_config(inner: E, config: &Config) -> Self {
        Self::new(
            inner,
            config.max_in_flight_embeddings,
            config.embedding_timeout,
        )
    }

    #[inline]
    pub fn inner(&self) -> &E {
        &self.inner
    }

    #[inline]
    pub fn available_permits(&self) -> usize {
        self.permits.available_permits()
    }

    async fn guarded<T, F>(&self, call: F) -> Result<T, EmbeddingError>
    where
        F: Future<Output = Result<T, EmbeddingError>>,
    {
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|_| EmbeddingError::Unavailable {
                reason: "embedding limiter closed".to_string(),
            })?;

        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result,
            Err(_) => {
                let ms = self.timeout.as_millis() as u64;
                warn!(timeout_ms = ms, "Embedding call timed out");
                Err(EmbeddingError::Timeout { ms })
            }
        }
    }
}

impl<E: Embedder> Embedder for GuardedEmbedder<E> {
    async fn encode(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        self.guarded(self.inner.encode(text)).await
    }

    async fn encode_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        self.guarded(self.inner.encode_batch(texts)).await
    }

    fn similarity(&self, a: &[f32], b: &[f32]) -> f32 {
        self.inner.similarity(a, b)
    }
}
