//! Juris library crate (used by the batch binary and integration tests).
//!
//! Scores structured legal answers for trustworthiness: are the citations
//! real, does the reasoning follow from them, are the claims grounded, and
//! does the answer catch known enforcement gaps.
//!
//! # Public API Surface
//!
//! ## Core Types
//! - [`Config`], [`ConfigError`] - Environment configuration
//! - [`Response`], [`Citation`], [`EnforcementGapClaim`] - Evaluated input
//! - [`EvaluationResult`], [`MetricScores`], [`Diagnostics`] - Per-response output
//! - [`WeightMap`] - Metric weights for the overall score
//!
//! ## Metrics
//! - [`CitationValidator`] - Locator, title and article checks
//! - [`CoherenceEvaluator`] - Reasoning support and contradictions
//! - [`GroundednessEvaluator`] - Legal statements backed by snippets
//! - [`GapDetectionEvaluator`] - Enforcement gaps caught
//! - [`JurisdictionScorer`] - Jurisdiction accuracy
//! - [`QualityAggregator`] - Weighted combination of all five
//!
//! ## Embedding
//! - [`Embedder`] - Capability used by coherence scoring
//! - [`LexicalEmbedder`], [`HttpEmbedder`] - Backends
//! - [`GuardedEmbedder`], [`CachedEmbedder`] - Limit and memoize wrappers
//! - [`build_embedder`] - Stack assembled from [`Config`]
//!
//! ## Reference Data
//! - [`ReferenceData`], [`ReferenceStore`] - Sources, gaps and markers
//! - [`SourceLookup`], [`GapLookup`] - Lookup capabilities
//!
//! ## Batch
//! - [`BatchRunner`], [`BatchItem`] - Concurrent batch evaluation
//! - [`AggregateReport`] - Summary, distribution and per-item results
//!
//! ## Test/Mock Support
//! Mock implementations are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod batch;
pub mod config;
pub mod constants;
pub mod embedding;
pub mod evaluator;
pub mod hashing;
pub mod model;
pub mod registry;
pub mod scoring;

pub use batch::{
    AggregateReport, BatchError, BatchItem, BatchRunner, BatchSummary, ItemFailure,
    QualityDistribution,
};
pub use config::{Config, ConfigError};
pub use embedding::{
    CachedEmbedder, DefaultEmbedder, Embedder, EmbeddingBackend, EmbeddingError, GuardedEmbedder,
    HttpEmbedder, LexicalEmbedder, build_embedder, cosine_similarity,
};
#[cfg(any(test, feature = "mock"))]
pub use embedding::MockEmbedder;
pub use evaluator::{EvaluationError, QualityAggregator};
pub use hashing::{hash_text, hash_to_u64};
pub use model::{
    Answer, Citation, ConfidenceLevel, Diagnostics, DocumentType, EnforcementGapClaim,
    EvaluationResult, Jurisdiction, Metric, MetricScores, ModelError, Response, RiskFlag,
    WeightMap,
};
#[cfg(any(test, feature = "mock"))]
pub use registry::UnavailableRegistry;
pub use registry::{
    CanonicalRegistry, CanonicalSource, GapCatalog, GapLookup, KnownGap, ReferenceData,
    ReferenceStore, RegistryError, SourceLookup, StepMarkers,
};
pub use scoring::{
    CitationValidator, CoherenceEvaluator, GapDetectionEvaluator, GroundednessEvaluator,
    JurisdictionScorer, MetricReport,
};
