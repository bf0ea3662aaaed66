//! Cross-cutting, shared constants.
//!
//! Thresholds used by the metric evaluators live here so that tests and
//! configuration refer to a single source. Tunable tables (step markers, gap
//! domains) are reference data, see [`crate::registry`].

/// Minimum support similarity for a reasoning step to count as cited.
pub const SUPPORT_THRESHOLD: f32 = 0.70;

/// Pairwise step similarity below which a pair counts as contradictory.
pub const CONTRADICTION_SIMILARITY: f32 = -0.30;

/// Contradiction ratio above which a dedicated violation is emitted.
pub const CONTRADICTION_RATIO_LIMIT: f64 = 0.30;

/// Fragments of this many characters or fewer are not reasoning steps.
pub const MIN_STEP_CHARS: usize = 20;

/// Excerpt length used when flagging an unsupported step.
pub const STEP_EXCERPT_CHARS: usize = 100;

/// Sentences shorter than this are never treated as legal statements.
pub const MIN_STATEMENT_CHARS: usize = 10;

/// Upper bound on the token overlap needed to ground a statement.
pub const MAX_GROUNDING_OVERLAP: usize = 3;

/// Gap percentages closer than this (in percentage points) are a match.
pub const GAP_TOLERANCE_POINTS: f64 = 15.0;

/// Overall score at or above which a result is high quality.
pub const HIGH_QUALITY_THRESHOLD: f64 = 0.8;

/// Overall score at or above which a result is medium quality.
pub const MEDIUM_QUALITY_THRESHOLD: f64 = 0.6;

/// Dimension of the local lexical embedder.
pub const LEXICAL_EMBEDDING_DIM: usize = 512;

/// Default per-call embedding timeout.
pub const DEFAULT_EMBEDDING_TIMEOUT_MS: u64 = 10_000;

/// Default cap on concurrent embedding calls.
pub const DEFAULT_MAX_IN_FLIGHT_EMBEDDINGS: usize = 8;

/// Default number of responses evaluated concurrently in a batch.
pub const DEFAULT_BATCH_CONCURRENCY: usize = 4;

/// Default capacity of the embedding memo cache.
pub const DEFAULT_EMBEDDING_CACHE_CAPACITY: u64 = 10_000;

/// Maximum snippet length accepted at the input boundary.
pub const MAX_SNIPPET_CHARS: usize = 500;

/// Accepted citation year range at the input boundary.
pub const MIN_CITATION_YEAR: i32 = 1800;
/// Accepted citation year range at the input boundary.
pub const MAX_CITATION_YEAR: i32 = 2100;
