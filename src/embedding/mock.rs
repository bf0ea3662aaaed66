use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use super::{Embedder, EmbeddingError, LexicalEmbedder, cosine_similarity};

/// Deterministic test double.
///
/// Texts without a registered vector fall back to [`LexicalEmbedder`].
#[derive(Debug, Default)]
pub struct MockEmbedder {
    vectors: HashMap<String, Vec<f32>>,
    fallback: LexicalEmbedder,
    fixed_similarity: Option<f32>,
    fail_all: bool,
    fail_on: HashSet<String>,
    delay: Option<Duration>,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MockEmbedder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `vector` whenever `text` is encoded.
    pub fn with_vector(mut self, text: impl Into<String>, vector: Vec<f32>) -> Self {
        self.vectors.insert(text.into(), vector);
        self
    }

    /// Every similarity comparison returns `value`.
    pub fn with_similarity(mut self, value: f32) -> Self {
        self.fixed_similarity = Some(value);
        self
    }

    /// Every encode call fails with [`EmbeddingError::Unavailable`].
    pub fn failing(mut self) -> Self {
        self.fail_all = true;
        self
    }

    /// Encoding exactly `text` fails.
    pub fn failing_on(mut self, text: impl Into<String>) -> Self {
        self.fail_on.insert(text.into());
        self
    }

    /// Sleeps before answering each encode call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of encode calls started.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Highest number of encode calls observed running at once.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

impl Embedder for MockEmbedder {
    async fn encode(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.fail_all || self.fail_on.contains(text) {
            return Err(EmbeddingError::Unavailable {
                reason: "mock embedder failure".to_string(),
            });
        }

        Ok(self
            .vectors
            .get(text)
            .cloned()
            .unwrap_or_else(|| self.fallback.embed(text)))
    }

    fn similarity(&self, a: &[f32], b: &[f32]) -> f32 {
        self.fixed_similarity
            .unwrap_or_else(|| cosine_similarity(a, b))
    }
}
