use thiserror::Error;

/// Errors raised while decoding or validating input records.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("{field} out of range: {value} (expected {min}..={max})")]
    OutOfRange {
        field: String,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("citation {index}: snippet is {len} characters (max {max})")]
    SnippetTooLong { index: usize, len: usize, max: usize },

    #[error("citation {index}: year {year} outside {min}..={max}")]
    YearOutOfRange {
        index: usize,
        year: i32,
        min: i32,
        max: i32,
    },

    #[error("unknown metric '{name}'")]
    UnknownMetric { name: String },

    #[error("invalid weight for {metric}: {value} (must be finite and non-negative)")]
    InvalidWeight { metric: String, value: f64 },

    #[error("malformed weight entry '{entry}': expected name=value")]
    MalformedWeight { entry: String },
}
