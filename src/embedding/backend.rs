use tracing::{info, warn};

use super::{
    CachedEmbedder, Embedder, EmbeddingError, GuardedEmbedder, HttpEmbedder, LexicalEmbedder,
};
use crate::config::Config;

/// Embedder stack used by the binary: cache over limiter over backend.
pub type DefaultEmbedder = CachedEmbedder<GuardedEmbedder<EmbeddingBackend>>;

/// Runtime choice between a remote endpoint and the local lexical embedder.
#[derive(Debug, Clone)]
pub enum EmbeddingBackend {
    Remote(HttpEmbedder),
    Lexical(LexicalEmbedder),
}

impl EmbeddingBackend {
    /// Remote when `JURIS_EMBEDDING_URL` is set, lexical otherwise.
    pub fn from_config(config: &Config) -> Self {
        match HttpEmbedder::from_config(config) {
            Some(remote) => {
                info!(
                    endpoint = remote.endpoint(),
                    model = %config.embedding_model,
                    "Using remote embedding endpoint"
                );
                EmbeddingBackend::Remote(remote)
            }
            None => {
                warn!("No JURIS_EMBEDDING_URL configured, using lexical embedder");
                EmbeddingBackend::Lexical(LexicalEmbedder::default())
            }
        }
    }

    #[inline]
    pub fn is_remote(&self) -> bool {
        matches!(self, EmbeddingBackend::Remote(_))
    }
}

impl Embedder for EmbeddingBackend {
    async fn encode(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        match self {
            EmbeddingBackend::Remote(remote) => remote.encode(text).await,
            EmbeddingBackend::Lexical(lexical) => lexical.encode(text).await,
        }
    }

    async fn encode_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        match self {
            EmbeddingBackend::Remote(remote) => remote.encode_batch(texts).await,
            EmbeddingBackend::Lexical(lexical) => lexical.encode_batch(texts).await,
        }
    }
}

/// Builds the configured backend wrapped in the in-flight limiter and cache.
pub fn build_embedder(config: &Config) -> DefaultEmbedder {
    CachedEmbedder::new(
        GuardedEmbedder::from_config(EmbeddingBackend::from_config(config), config),
        config.embedding_cache_capacity,
    )
}
