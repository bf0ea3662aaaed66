//! Environment-backed configuration.
//!
//! Most settings have defaults. Override with `JURIS_*` environment variables.

pub mod error;

#[cfg(test)]
mod tests;

pub use error::ConfigError;

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{
    DEFAULT_BATCH_CONCURRENCY, DEFAULT_EMBEDDING_CACHE_CAPACITY, DEFAULT_EMBEDDING_TIMEOUT_MS,
    DEFAULT_MAX_IN_FLIGHT_EMBEDDINGS,
};
use crate::model::WeightMap;

/// Default model name sent to a remote embedding endpoint.
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";

/// Evaluator configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `JURIS_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Metric weights. Default: 0.25/0.20/0.25/0.15/0.15.
    pub weights: WeightMap,

    /// JSON file of canonical sources (built-in table when unset).
    pub sources_path: Option<PathBuf>,

    /// JSON file of known enforcement gaps (built-in table when unset).
    pub gaps_path: Option<PathBuf>,

    /// JSON file of gap domains (built-in table when unset).
    pub gap_domains_path: Option<PathBuf>,

    /// JSON array of reasoning step markers (built-in list when unset).
    pub step_markers_path: Option<PathBuf>,

    /// OpenAI-compatible embeddings endpoint. Local lexical embedder when unset.
    pub embedding_url: Option<String>,

    /// Model name sent to the embedding endpoint.
    pub embedding_model: String,

    /// Bearer token for the embedding endpoint.
    pub embedding_api_key: Option<String>,

    /// Per-call embedding timeout. Default: 10s.
    pub embedding_timeout: Duration,

    /// Max embedding calls in flight at once. Default: `8`.
    pub max_in_flight_embeddings: usize,

    /// Responses evaluated concurrently by the batch runner. Default: `4`.
    pub batch_concurrency: usize,

    /// Max vectors memoized by the embedding cache. Default: `10_000`.
    pub embedding_cache_capacity: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            weights: WeightMap::default(),
            sources_path: None,
            gaps_path: None,
            gap_domains_path: None,
            step_markers_path: None,
            embedding_url: None,
            embedding_model: DEFAULT_EMBEDDING_MODEL.to_string(),
            embedding_api_key: None,
            embedding_timeout: Duration::from_millis(DEFAULT_EMBEDDING_TIMEOUT_MS),
            max_in_flight_embeddings: DEFAULT_MAX_IN_FLIGHT_EMBEDDINGS,
            batch_concurrency: DEFAULT_BATCH_CONCURRENCY,
            embedding_cache_capacity: DEFAULT_EMBEDDING_CACHE_CAPACITY,
        }
    }
}

impl Config {
    const ENV_WEIGHTS: &'static str = "JURIS_WEIGHTS";
    const ENV_SOURCES_PATH: &'static str = "JURIS_SOURCES_PATH";
    const ENV_GAPS_PATH: &'static str = "JURIS_GAPS_PATH";
    const ENV_GAP_DOMAINS_PATH: &'static str = "JURIS_GAP_DOMAINS_PATH";
    const ENV_STEP_MARKERS_PATH: &'static str = "JURIS_STEP_MARKERS_PATH";
    const ENV_EMBEDDING_URL: &'static str = "JURIS_EMBEDDING_URL";
    const ENV_EMBEDDING_MODEL: &'static str = "JURIS_EMBEDDING_MODEL";
    const ENV_EMBEDDING_API_KEY: &'static str = "JURIS_EMBEDDING_API_KEY";
    const ENV_EMBEDDING_TIMEOUT_MS: &'static str = "JURIS_EMBEDDING_TIMEOUT_MS";
    const ENV_MAX_IN_FLIGHT: &'static str = "JURIS_MAX_IN_FLIGHT_EMBEDDINGS";
    const ENV_BATCH_CONCURRENCY: &'static str = "JURIS_BATCH_CONCURRENCY";
    const ENV_CACHE_CAPACITY: &'static str = "JURIS_EMBEDDING_CACHE_CAPACITY";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let weights = Self::parse_weights_from_env(defaults.weights)?;
        let sources_path = Self::parse_optional_path_from_env(Self::ENV_SOURCES_PATH);
        let gaps_path = Self::parse_optional_path_from_env(Self::ENV_GAPS_PATH);
        let gap_domains_path = Self::parse_optional_path_from_env(Self::ENV_GAP_DOMAINS_PATH);
        let step_markers_path = Self::parse_optional_path_from_env(Self::ENV_STEP_MARKERS_PATH);
        let embedding_url = Self::parse_optional_string_from_env(Self::ENV_EMBEDDING_URL);
        let embedding_model =
            Self::parse_string_from_env(Self::ENV_EMBEDDING_MODEL, defaults.embedding_model);
        let embedding_api_key = Self::parse_optional_string_from_env(Self::ENV_EMBEDDING_API_KEY);
        let embedding_timeout = Duration::from_millis(Self::parse_u64_from_env(
            Self::ENV_EMBEDDING_TIMEOUT_MS,
            defaults.embedding_timeout.as_millis() as u64,
        ));
        let max_in_flight_embeddings = Self::parse_u64_from_env(
            Self::ENV_MAX_IN_FLIGHT,
            defaults.max_in_flight_embeddings as u64,
        ) as usize;
        let batch_concurrency = Self::parse_u64_from_env(
            Self::ENV_BATCH_CONCURRENCY,
            defaults.batch_concurrency as u64,
        ) as usize;
        let embedding_cache_capacity =
            Self::parse_u64_from_env(Self::ENV_CACHE_CAPACITY, defaults.embedding_cache_capacity);

        Ok(Self {
            weights,
            sources_path,
            gaps_path,
            gap_domains_path,
            step_markers_path,
            embedding_url,
            embedding_model,
            embedding_api_key,
            embedding_timeout,
            max_in_flight_embeddings,
            batch_concurrency,
            embedding_cache_capacity,
        })
    }

    /// Validates limits, the embedding URL and reference-data paths.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.weights
            .validate()
            .map_err(|source| ConfigError::InvalidWeights {
                value: format!("{:?}", self.weights),
                source,
            })?;

        if self.embedding_timeout.is_zero() {
            return Err(ConfigError::ZeroLimit {
                name: Self::ENV_EMBEDDING_TIMEOUT_MS,
            });
        }
        if self.max_in_flight_embeddings == 0 {
            return Err(ConfigError::ZeroLimit {
                name: Self::ENV_MAX_IN_FLIGHT,
            });
        }
        if self.batch_concurrency == 0 {
            return Err(ConfigError::ZeroLimit {
                name: Self::ENV_BATCH_CONCURRENCY,
            });
        }

        if let Some(url) = &self.embedding_url
            && !(url.starts_with("http://") || url.starts_with("https://"))
        {
            return Err(ConfigError::InvalidEmbeddingUrl { value: url.clone() });
        }

        for path in [
            &self.sources_path,
            &self.gaps_path,
            &self.gap_domains_path,
            &self.step_markers_path,
        ]
        .into_iter()
        .flatten()
        {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_file() {
                return Err(ConfigError::NotAFile { path: path.clone() });
            }
        }

        Ok(())
    }

    fn parse_weights_from_env(default: WeightMap) -> Result<WeightMap, ConfigError> {
        match env::var(Self::ENV_WEIGHTS) {
            Ok(value) => default
                .apply_overrides(&value)
                .map_err(|source| ConfigError::InvalidWeights { value, source }),
            Err(_) => Ok(default),
        }
    }

    fn parse_optional_path_from_env(var_name: &str) -> Option<PathBuf> {
        Self::parse_optional_string_from_env(var_name).map(PathBuf::from)
    }

    fn parse_optional_string_from_env(var_name: &str) -> Option<String> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        env::var(var_name).unwrap_or(default)
    }

    fn parse_u64_from_env(var_name: &str, default: u64) -> u64 {
        env::var(var_name)
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default)
    }
}
