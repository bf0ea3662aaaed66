use super::*;
use crate::model::Metric;
use serial_test::serial;
use std::env;
use std::path::PathBuf;

fn with_env_vars<F, R>(vars: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, value) in vars {
        unsafe { env::set_var(key, value) };
    }

    let result = f();

    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, _) in vars {
        unsafe { env::remove_var(key) };
    }

    result
}

fn clear_juris_env() {
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    unsafe {
        env::remove_var("JURIS_WEIGHTS");
        env::remove_var("JURIS_SOURCES_PATH");
        env::remove_var("JURIS_GAPS_PATH");
        env::remove_var("JURIS_GAP_DOMAINS_PATH");
        env::remove_var("JURIS_STEP_MARKERS_PATH");
        env::remove_var("JURIS_EMBEDDING_URL");
        env::remove_var("JURIS_EMBEDDING_MODEL");
        env::remove_var("JURIS_EMBEDDING_API_KEY");
        env::remove_var("JURIS_EMBEDDING_TIMEOUT_MS");
        env::remove_var("JURIS_MAX_IN_FLIGHT_EMBEDDINGS");
        env::remove_var("JURIS_BATCH_CONCURRENCY");
        env::remove_var("JURIS_EMBEDDING_CACHE_CAPACITY");
    }
}

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.weights, WeightMap::default());
    assert!(config.sources_path.is_none());
    assert!(config.embedding_url.is_none());
    assert_eq!(config.embedding_model, DEFAULT_EMBEDDING_MODEL);
    assert_eq!(config.embedding_timeout, Duration::from_secs(10));
    assert_eq!(config.max_in_flight_embeddings, 8);
    assert_eq!(config.batch_concurrency, 4);
    assert_eq!(config.embedding_cache_capacity, 10_000);
    assert!(config.validate().is_ok());
}

#[test]
#[serial]
fn test_from_env_with_defaults() {
    clear_juris_env();

    let config = Config::from_env().expect("should parse with defaults");

    assert_eq!(config.weights, WeightMap::default());
    assert_eq!(config.batch_concurrency, 4);
}

#[test]
#[serial]
fn test_from_env_overrides() {
    clear_juris_env();

    let config = with_env_vars(
        &[
            ("JURIS_WEIGHTS", "groundedness=0.5, gap_detection_rate=0"),
            ("JURIS_EMBEDDING_URL", "http://localhost:11434/v1"),
            ("JURIS_EMBEDDING_MODEL", "nomic-embed-text"),
            ("JURIS_EMBEDDING_TIMEOUT_MS", "2500"),
            ("JURIS_MAX_IN_FLIGHT_EMBEDDINGS", "2"),
            ("JURIS_BATCH_CONCURRENCY", "16"),
            ("JURIS_EMBEDDING_CACHE_CAPACITY", "42"),
        ],
        Config::from_env,
    )
    .expect("should parse");

    assert_eq!(config.weights.get(Metric::Groundedness), 0.5);
    assert_eq!(config.weights.get(Metric::GapDetectionRate), 0.0);
    assert_eq!(config.weights.get(Metric::CitationPrecision), 0.25);
    assert_eq!(
        config.embedding_url.as_deref(),
        Some("http://localhost:11434/v1")
    );
    assert_eq!(config.embedding_model, "nomic-embed-text");
    assert_eq!(config.embedding_timeout, Duration::from_millis(2500));
    assert_eq!(config.max_in_flight_embeddings, 2);
    assert_eq!(config.batch_concurrency, 16);
    assert_eq!(config.embedding_cache_capacity, 42);
}

#[test]
#[serial]
fn test_invalid_numbers_fall_back_to_defaults() {
    clear_juris_env();

    let config = with_env_vars(
        &[
            ("JURIS_BATCH_CONCURRENCY", "lots"),
            ("JURIS_EMBEDDING_TIMEOUT_MS", "-5"),
        ],
        Config::from_env,
    )
    .expect("should parse");

    assert_eq!(config.batch_concurrency, 4);
    assert_eq!(config.embedding_timeout, Duration::from_secs(10));
}

#[test]
#[serial]
fn test_unknown_metric_in_weights_is_rejected() {
    clear_juris_env();

    let result = with_env_vars(&[("JURIS_WEIGHTS", "vibes=1.0")], Config::from_env);

    assert!(matches!(result, Err(ConfigError::InvalidWeights { .. })));
}

#[test]
#[serial]
fn test_negative_weight_is_rejected() {
    clear_juris_env();

    let result = with_env_vars(&[("JURIS_WEIGHTS", "groundedness=-0.1")], Config::from_env);

    assert!(matches!(result, Err(ConfigError::InvalidWeights { .. })));
}

#[test]
#[serial]
fn test_blank_optional_values_are_unset() {
    clear_juris_env();

    let config = with_env_vars(
        &[("JURIS_EMBEDDING_URL", "  "), ("JURIS_SOURCES_PATH", "")],
        Config::from_env,
    )
    .expect("should parse");

    assert!(config.embedding_url.is_none());
    assert!(config.sources_path.is_none());
}

#[test]
fn test_validate_rejects_zero_limits() {
    let config = Config {
        batch_concurrency: 0,
        ..Default::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::ZeroLimit {
            name: "JURIS_BATCH_CONCURRENCY"
        })
    ));

    let config = Config {
        max_in_flight_embeddings: 0,
        ..Default::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::ZeroLimit { .. })
    ));

    let config = Config {
        embedding_timeout: Duration::ZERO,
        ..Default::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::ZeroLimit { .. })
    ));
}

#[test]
fn test_validate_rejects_non_http_url() {
    let config = Config {
        embedding_url: Some("localhost:8000".to_string()),
        ..Default::default()
    };

    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidEmbeddingUrl { .. })
    ));
}

#[test]
fn test_validate_missing_path() {
    let config = Config {
        sources_path: Some(PathBuf::from("/nonexistent/sources.json")),
        ..Default::default()
    };

    assert!(matches!(
        config.validate(),
        Err(ConfigError::PathNotFound { .. })
    ));
}

#[test]
fn test_validate_directory_is_not_a_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = Config {
        step_markers_path: Some(dir.path().to_path_buf()),
        ..Default::default()
    };

    assert!(matches!(config.validate(), Err(ConfigError::NotAFile { .. })));
}

#[test]
fn test_validate_existing_file() {
    let file = tempfile::NamedTempFile::new().expect("tempfile");
    let config = Config {
        gaps_path: Some(file.path().to_path_buf()),
        ..Default::default()
    };

    assert!(config.validate().is_ok());
}
