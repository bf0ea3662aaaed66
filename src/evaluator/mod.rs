//! Weighted combination of the five metrics into one [`EvaluationResult`].

pub mod error;


pub use error::EvaluationError;

use std::sync::Arc;

use tracing::{info, instrument};

use crate::embedding::Embedder;
use crate::model::{Diagnostics, EvaluationResult, MetricScores, Response, WeightMap};
use crate::registry::{GapLookup, ReferenceData, SourceLookup};
use crate::scoring::{
    CitationValidator, CoherenceEvaluator, GapDetectionEvaluator, GroundednessEvaluator,
    JurisdictionScorer,
};

/// Runs every metric over a response and applies the weight map.
///
/// Holds no mutable state; one aggregator can serve concurrent evaluations.
#[derive(Debug)]
pub struct QualityAggregator<E> {
    citations: CitationValidator,
    coherence: CoherenceEvaluator<E>,
    groundedness: GroundednessEvaluator,
    gaps: GapDetectionEvaluator,
    jurisdiction: JurisdictionScorer,
    weights: WeightMap,
}

impl<E: Embedder> QualityAggregator<E> {
    /// Builds an aggregator reading every table from one reference snapshot.
    pub fn new(
        embedder: E,
        reference: Arc<ReferenceData>,
        weights: WeightMap,
    ) -> Result<Self, EvaluationError> {
        let coherence = CoherenceEvaluator::new(embedder, &reference.markers)?;
        let sources: Arc<dyn SourceLookup> = reference.clone();
        let gaps: Arc<dyn GapLookup> = reference;

        Self::from_parts(
            CitationValidator::new(sources),
            coherence,
            GapDetectionEvaluator::new(gaps),
            weights,
        )
    }

    /// Assembles an aggregator from already-built evaluators.
    pub fn from_parts(
        citations: CitationValidator,
        coherence: CoherenceEvaluator<E>,
        gaps: GapDetectionEvaluator,
        weights: WeightMap,
    ) -> Result<Self, EvaluationError> {
        weights.validate()?;

        Ok(Self {
            citations,
            coherence,
            groundedness: GroundednessEvaluator::new(),
            gaps,
            jurisdiction: JurisdictionScorer::new(),
            weights,
        })
    }

    #[inline]
    pub fn weights(&self) -> &WeightMap {
        &self.weights
    }

    /// Scores one response against an optional query context (`""` if none).
    #[instrument(skip_all, fields(query_id = response.query_id.as_deref().unwrap_or(""), citations = response.citations.len()))]
    pub async fn evaluate(
        &self,
        response: &Response,
        query_context: &str,
    ) -> Result<EvaluationResult, EvaluationError> {
        let citation = self.citations.validate(&response.citations)?;
        let coherence = self
            .coherence
            .evaluate(&response.answer.reasoning, &response.citations)
            .await?;
        let groundedness = self
            .groundedness
            .evaluate(&response.answer.summary, &response.citations);
        let jurisdiction_accuracy = self.jurisdiction.evaluate(response);

        let gaps = self
            .gaps
            .evaluate(response.enforcement_gap.as_slice(), query_context)?;

        let mut scores = MetricScores {
            citation_precision: citation.score,
            nli_coherence: coherence.score,
            groundedness: groundedness.score,
            jurisdiction_accuracy,
            gap_detection_rate: gaps.score,
            overall_score: 0.0,
        };
        scores.overall_score = scores.weighted_sum(&self.weights);

        let diagnostics = Diagnostics {
            citation_errors: citation.diagnostics,
            coherence_violations: coherence.diagnostics,
            ungrounded_statements: groundedness.diagnostics,
            jurisdiction_mismatches: Vec::new(),
        };

        info!(
            overall = scores.overall_score,
            citation_precision = scores.citation_precision,
            nli_coherence = scores.nli_coherence,
            groundedness = scores.groundedness,
            jurisdiction_accuracy = scores.jurisdiction_accuracy,
            gap_detection_rate = scores.gap_detection_rate,
            missed_gaps = gaps.diagnostics.len(),
            "Response evaluated"
        );

        Ok(EvaluationResult::new(scores, diagnostics))
    }
}
