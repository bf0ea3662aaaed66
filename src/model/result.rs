use serde::{Deserialize, Serialize};

use super::weights::{Metric, WeightMap};

/// Scores produced by one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MetricScores {
    pub citation_precision: f64,
    pub nli_coherence: f64,
    pub groundedness: f64,
    pub jurisdiction_accuracy: f64,
    pub gap_detection_rate: f64,
    pub overall_score: f64,
}

impl MetricScores {
    /// Score for a single metric.
    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::CitationPrecision => self.citation_precision,
            Metric::NliCoherence => self.nli_coherence,
            Metric::Groundedness => self.groundedness,
            Metric::JurisdictionAccuracy => self.jurisdiction_accuracy,
            Metric::GapDetectionRate => self.gap_detection_rate,
        }
    }

    /// Σ weight·score over every metric.
    pub fn weighted_sum(&self, weights: &WeightMap) -> f64 {
        Metric::ALL
            .iter()
            .map(|metric| weights.get(*metric) * self.get(*metric))
            .sum()
    }
}

/// Ordered human-readable diagnostics, one list per concern.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Diagnostics {
    #[serde(default)]
    pub citation_errors: Vec<String>,
    #[serde(default)]
    pub coherence_violations: Vec<String>,
    #[serde(default)]
    pub ungrounded_statements: Vec<String>,
    #[serde(default)]
    pub jurisdiction_mismatches: Vec<String>,
}

impl Diagnostics {
    pub fn is_empty(&self) -> bool {
        self.citation_errors.is_empty()
            && self.coherence_violations.is_empty()
            && self.ungrounded_statements.is_empty()
            && self.jurisdiction_mismatches.is_empty()
    }
}

/// Immutable outcome of evaluating one response.
///
/// Serializes as `{"scores": {...}, "errors": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    scores: MetricScores,
    errors: Diagnostics,
}

impl EvaluationResult {
    pub fn new(scores: MetricScores, errors: Diagnostics) -> Self {
        Self { scores, errors }
    }

    #[inline]
    pub fn scores(&self) -> &MetricScores {
        &self.scores
    }

    #[inline]
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.errors
    }

    #[inline]
    pub fn overall_score(&self) -> f64 {
        self.scores.overall_score
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
