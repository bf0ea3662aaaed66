use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{HIGH_QUALITY_THRESHOLD, MEDIUM_QUALITY_THRESHOLD};
use crate::model::EvaluationResult;

/// Aggregate statistics over the successfully evaluated items.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total_responses: usize,
    pub evaluated: usize,
    pub failed: usize,
    pub mean_overall_score: f64,
    /// Population standard deviation.
    pub std_overall_score: f64,
    pub mean_citation_precision: f64,
    pub mean_coherence: f64,
    pub mean_groundedness: f64,
}

/// Counts of results per overall-score band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QualityDistribution {
    pub high_quality: usize,
    pub medium_quality: usize,
    pub low_quality: usize,
}

impl QualityDistribution {
    pub fn record(&mut self, overall: f64) {
        if overall >= HIGH_QUALITY_THRESHOLD {
            self.high_quality += 1;
        } else if overall >= MEDIUM_QUALITY_THRESHOLD {
            self.medium_quality += 1;
        } else {
            self.low_quality += 1;
        }
    }

    #[inline]
    pub fn total(&self) -> usize {
        self.high_quality + self.medium_quality + self.low_quality
    }
}

/// An item whose evaluation hit a capability failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemFailure {
    /// Zero-based position in the batch.
    pub index: usize,
    pub error: String,
}

/// Output of a batch run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateReport {
    pub summary: BatchSummary,
    pub distribution: QualityDistribution,
    /// Results of the evaluated items, in batch order.
    pub detailed_results: Vec<EvaluationResult>,
    #[serde(default)]
    pub failures: Vec<ItemFailure>,
    pub generated_at: DateTime<Utc>,
}

impl AggregateReport {
    /// Computes summary and distribution; means are 0.0 when nothing was evaluated.
    pub fn from_results(
        total_responses: usize,
        detailed_results: Vec<EvaluationResult>,
        failures: Vec<ItemFailure>,
    ) -> Self {
        let overall: Vec<f64> = detailed_results
            .iter()
            .map(EvaluationResult::overall_score)
            .collect();

        let mut distribution = QualityDistribution::default();
        for score in &overall {
            distribution.record(*score);
        }

        let summary = BatchSummary {
            total_responses,
            evaluated: detailed_results.len(),
            failed: failures.len(),
            mean_overall_score: mean(&overall),
            std_overall_score: population_std(&overall),
            mean_citation_precision: mean_of(&detailed_results, |r| r.scores().citation_precision),
            mean_coherence: mean_of(&detailed_results, |r| r.scores().nli_coherence),
            mean_groundedness: mean_of(&detailed_results, |r| r.scores().groundedness),
        };

        Self {
            summary,
            distribution,
            detailed_results,
            failures,
            generated_at: Utc::now(),
        }
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

fn population_std(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

fn mean_of(results: &[EvaluationResult], score: impl Fn(&EvaluationResult) -> f64) -> f64 {
    let values: Vec<f64> = results.iter().map(score).collect();
    mean(&values)
}
