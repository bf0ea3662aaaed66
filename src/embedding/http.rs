use std::time::Duration;

use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Embedder, EmbeddingError};
use crate::config::Config;

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [&'a str],
}

#[derive(Deserialize)]
pub(super) struct EmbeddingResponse {
    pub(super) data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
pub(super) struct EmbeddingData {
    embedding: Vec<f32>,
    #[serde(default)]
    index: Option<usize>,
}

/// Client for an OpenAI-compatible `POST {base_url}/embeddings` endpoint.
#[derive(Debug, Clone)]
pub struct HttpEmbedder {
    http: HttpClient,
    endpoint: String,
    model: String,
    api_key: Option<String>,
}

impl HttpEmbedder {
    pub fn new(base_url: &str, model: impl Into<String>, api_key: Option<String>) -> Self {
        Self::with_client(HttpClient::new(), base_url, model, api_key)
    }

    pub fn with_client(
        http: HttpClient,
        base_url: &str,
        model: impl Into<String>,
        api_key: Option<String>,
    ) -> Self {
        Self {
            http,
            endpoint: format!("{}/embeddings", base_url.trim_end_matches('/')),
            model: model.into(),
            api_key,
        }
    }

    /// Builds a client from `JURIS_EMBEDDING_*` settings, if a URL is configured.
    ///
    /// The request timeout is a backstop; [`super::GuardedEmbedder`] enforces
    /// the configured per-call limit.
    pub fn from_config(config: &Config) -> Option<Self> {
        let url = config.embedding_url.as_deref()?;
        let http = HttpClient::builder()
            .timeout(config.embedding_timeout + Duration::from_secs(1))
            .build()
            .unwrap_or_else(|_| HttpClient::new());
        Some(Self::with_client(
            http,
            url,
            config.embedding_model.clone(),
            config.embedding_api_key.clone(),
        ))
    }

    #[inline]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn request(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let body = EmbeddingRequest {
            model: &self.model,
            input: texts,
        };

        let mut request = self.http.post(&self.endpoint).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let resp = request.send().await?;
        if !resp.status().is_success() {
            return Err(EmbeddingError::RequestFailed {
                reason: format!("embedding endpoint returned {}", resp.status()),
            });
        }

        let parsed: EmbeddingResponse = resp.json().await?;
        debug!(
            inputs = texts.len(),
            outputs = parsed.data.len(),
            "Remote embeddings received"
        );
        order_embeddings(parsed.data, texts.len())
    }
}

pub(super) fn order_embeddings(
    mut data: Vec<EmbeddingData>,
    expected: usize,
) -> Result<Vec<Vec<f32>>, EmbeddingError> {
    if data.len() != expected {
        return Err(EmbeddingError::InvalidResponse {
            reason: format!("expected {expected} embeddings, got {}", data.len()),
        });
    }

    if data.iter().all(|d| d.index.is_some()) {
        data.sort_by_key(|d| d.index);
    }

    if data.iter().any(|d| d.embedding.is_empty()) {
        return Err(EmbeddingError::InvalidResponse {
            reason: "empty embedding vector".to_string(),
        });
    }

    Ok(data.into_iter().map(|d| d.embedding).collect())
}

impl Embedder for HttpEmbedder {
    async fn encode(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        self.request(&[text])
            .await?
            .pop()
            .ok_or_else(|| EmbeddingError::InvalidResponse {
                reason: "no embedding returned".to_string(),
            })
    }

    async fn encode_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        self.request(texts).await
    }
}
