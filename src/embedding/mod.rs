//! Text embedding capability.
//!
//! Coherence scoring only needs `encode` and `similarity`; everything else is
//! a backend or a wrapper:
//!
//! - [`LexicalEmbedder`]: deterministic hashed bag-of-words, no I/O.
//! - [`HttpEmbedder`]: OpenAI-compatible `/embeddings` endpoint.
//! - [`GuardedEmbedder`]: in-flight limit plus per-call timeout.
//! - [`CachedEmbedder`]: memoizes vectors by text hash.
//!
//! [`build_embedder`] assembles the stack from [`crate::config::Config`].

mod backend;
mod cache;
pub mod error;
mod guard;
mod http;
mod lexical;

#[cfg(any(test, feature = "mock"))]
mod mock;


pub use backend::{DefaultEmbedder, EmbeddingBackend, build_embedder};
pub use cache::CachedEmbedder;
pub use error::EmbeddingError;
pub use guard::GuardedEmbedder;
pub use http::HttpEmbedder;
pub use lexical::LexicalEmbedder;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockEmbedder;

use std::future::Future;
use std::sync::Arc;

use futures_util::future::try_join_all;

/// Turns text into vectors and compares them.
pub trait Embedder: Send + Sync {
    /// Embeds a single text.
    fn encode(&self, text: &str) -> impl Future<Output = Result<Vec<f32>, EmbeddingError>> + Send;

    /// Embeds several texts, preserving order.
    fn encode_batch(
        &self,
        texts: &[&str],
    ) -> impl Future<Output = Result<Vec<Vec<f32>>, EmbeddingError>> + Send {
        async move { try_join_all(texts.iter().map(|text| self.encode(text))).await }
    }

    /// Similarity in `[-1, 1]`. Cosine by default.
    fn similarity(&self, a: &[f32], b: &[f32]) -> f32 {
        cosine_similarity(a, b)
    }
}

impl<T: Embedder> Embedder for Arc<T> {
    async fn encode(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        (**self).encode(text).await
    }

    async fn encode_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        (**self).encode_batch(texts).await
    }

    fn similarity(&self, a: &[f32], b: &[f32]) -> f32 {
        (**self).similarity(a, b)
    }
}

/// Cosine similarity; `0.0` for empty, mismatched or zero-norm inputs.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let (dot, norm_a_sq, norm_b_sq) = a
        .iter()
        .zip(b.iter())
        .fold((0.0f32, 0.0f32, 0.0f32), |(dot, na, nb), (x, y)| {
            (dot + x * y, na + x * x, nb + y * y)
        });

    let norm_a = norm_a_sq.sqrt();
    let norm_b = norm_b_sq.sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        (dot / (norm_a * norm_b)).clamp(-1.0, 1.0)
    }
}

pub(crate) fn normalize(mut embedding: Vec<f32>) -> Vec<f32> {
    let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm > 0.0 {
        for x in &mut embedding {
            *x /= norm;
        }
    }

    embedding
}
