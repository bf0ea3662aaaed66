//! The five quality metrics.
//!
//! Each evaluator returns a [`MetricReport`] (score plus ordered diagnostics).
//! Evaluators that consult an external capability (registry or embedder)
//! return `Result`; a capability failure is never folded into a score.

mod citation;
mod coherence;
mod gaps;
mod groundedness;
mod jurisdiction;
mod types;


pub use citation::CitationValidator;
pub use coherence::CoherenceEvaluator;
pub use gaps::GapDetectionEvaluator;
pub use groundedness::GroundednessEvaluator;
pub use jurisdiction::JurisdictionScorer;
pub use types::MetricReport;
