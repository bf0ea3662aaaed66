use futures_util::future::try_join;
use regex::Regex;
use tracing::debug;

use super::types::{MetricReport, ratio};
use crate::constants::{
    CONTRADICTION_RATIO_LIMIT, CONTRADICTION_SIMILARITY, MIN_STEP_CHARS, STEP_EXCERPT_CHARS,
    SUPPORT_THRESHOLD,
};
use crate::embedding::{Embedder, EmbeddingError};
use crate::model::Citation;
use crate::registry::{RegistryResult, StepMarkers};

const INSUFFICIENT_CONTENT: &str = "Insufficient content for coherence evaluation";
const CONTRADICTION_VIOLATION: &str = "Internal logical contradictions detected in reasoning";

/// Scores how well each reasoning step is supported by the cited sources and
/// penalizes steps that point in opposite directions.
#[derive(Debug)]
pub struct CoherenceEvaluator<E> {
    embedder: E,
    markers: Vec<Regex>,
}

impl<E: Embedder> CoherenceEvaluator<E> {
    pub fn new(embedder: E, markers: &StepMarkers) -> RegistryResult<Self> {
        Ok(Self {
            embedder,
            markers: markers.compile()?,
        })
    }

    #[inline]
    pub fn embedder(&self) -> &E {
        &self.embedder
    }

    /// Splits `text` on every step marker in order, keeping trimmed fragments
    /// longer than the minimum step length.
    pub fn segment(&self, text: &str) -> Vec<String> {
        let mut steps: Vec<&str> = vec![text];

        for marker in &self.markers {
            steps = steps
                .into_iter()
                .flat_map(|step| marker.split(step))
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .collect();
        }

        steps
            .into_iter()
            .filter(|step| step.chars().count() > MIN_STEP_CHARS)
            .map(str::to_string)
            .collect()
    }

    pub async fn evaluate(
        &self,
        reasoning: &str,
        citations: &[Citation],
    ) -> Result<MetricReport, EmbeddingError> {
        if reasoning.is_empty() || citations.is_empty() {
            return Ok(MetricReport::insufficient(INSUFFICIENT_CONTENT));
        }

        let steps = self.segment(reasoning);
        if steps.is_empty() {
            debug!(reasoning_len = reasoning.len(), "No usable reasoning steps");
            return Ok(MetricReport::insufficient(INSUFFICIENT_CONTENT));
        }

        let step_refs: Vec<&str> = steps.iter().map(String::as_str).collect();
        let support_refs: Vec<&str> = citations.iter().map(Citation::support_text).collect();

        let (step_vectors, support_vectors) = try_join(
            self.embedder.encode_batch(&step_refs),
            self.embedder.encode_batch(&support_refs),
        )
        .await?;

        let mut violations = Vec::new();
        let mut total_support = 0.0f64;

        for (i, (step, vector)) in steps.iter().zip(&step_vectors).enumerate() {
            let support = self.support_score(vector, &support_vectors);
            total_support += support;

            if support < f64::from(SUPPORT_THRESHOLD) {
                violations.push(format!(
                    "Step {} lacks sufficient citation support: {}...",
                    i + 1,
                    excerpt(step)
                ));
            }
        }

        let contradiction = self.contradiction_ratio(&step_vectors);
        if contradiction > CONTRADICTION_RATIO_LIMIT {
            violations.push(CONTRADICTION_VIOLATION.to_string());
        }

        let mean_support = total_support / steps.len() as f64;
        let score = mean_support * (1.0 - contradiction);

        debug!(
            steps = steps.len(),
            mean_support,
            contradiction,
            score,
            "Coherence evaluated"
        );

        Ok(MetricReport::new(score, violations))
    }

    /// Best similarity against any citation, clamped into `[0, 1]`.
    fn support_score(&self, step: &[f32], supports: &[Vec<f32>]) -> f64 {
        supports
            .iter()
            .map(|support| self.embedder.similarity(step, support))
            .fold(None, |best: Option<f32>, s| Some(best.map_or(s, |b| b.max(s))))
            .map_or(0.0, |best| f64::from(best.clamp(0.0, 1.0)))
    }

    /// Share of unordered step pairs whose similarity is strongly negative.
    fn contradiction_ratio(&self, steps: &[Vec<f32>]) -> f64 {
        if steps.len() < 2 {
            return 0.0;
        }

        let mut contradictions = 0usize;
        let mut pairs = 0usize;
        for (i, a) in steps.iter().enumerate() {
            for b in &steps[i + 1..] {
                if self.embedder.similarity(a, b) < CONTRADICTION_SIMILARITY {
                    contradictions += 1;
                }
                pairs += 1;
            }
        }

        ratio(contradictions, pairs)
    }
}

fn excerpt(step: &str) -> &str {
    match step.char_indices().nth(STEP_EXCERPT_CHARS) {
        Some((end, _)) => &step[..end],
        None => step,
    }
}
