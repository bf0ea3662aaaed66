use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::ModelError;

/// The five quality metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    CitationPrecision,
    NliCoherence,
    Groundedness,
    JurisdictionAccuracy,
    GapDetectionRate,
}

impl Metric {
    pub const ALL: [Metric; 5] = [
        Metric::CitationPrecision,
        Metric::NliCoherence,
        Metric::Groundedness,
        Metric::JurisdictionAccuracy,
        Metric::GapDetectionRate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::CitationPrecision => "citation_precision",
            Metric::NliCoherence => "nli_coherence",
            Metric::Groundedness => "groundedness",
            Metric::JurisdictionAccuracy => "jurisdiction_accuracy",
            Metric::GapDetectionRate => "gap_detection_rate",
        }
    }
}

impl FromStr for Metric {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Metric::ALL
            .into_iter()
            .find(|m| m.as_str() == s.trim())
            .ok_or_else(|| ModelError::UnknownMetric {
                name: s.trim().to_string(),
            })
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metric → non-negative weight used for the overall score.
///
/// Weights need not sum to 1. Metrics without an entry weigh 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeightMap {
    weights: BTreeMap<Metric, f64>,
}

impl Default for WeightMap {
    fn default() -> Self {
        Self {
            weights: BTreeMap::from([
                (Metric::CitationPrecision, 0.25),
                (Metric::NliCoherence, 0.20),
                (Metric::Groundedness, 0.25),
                (Metric::JurisdictionAccuracy, 0.15),
                (Metric::GapDetectionRate, 0.15),
            ]),
        }
    }
}

impl WeightMap {
    /// An empty map (every metric weighs 0).
    pub fn empty() -> Self {
        Self {
            weights: BTreeMap::new(),
        }
    }

    /// Sets a weight, rejecting negative or non-finite values.
    pub fn with(mut self, metric: Metric, weight: f64) -> Result<Self, ModelError> {
        self.set(metric, weight)?;
        Ok(self)
    }

    pub fn set(&mut self, metric: Metric, weight: f64) -> Result<(), ModelError> {
        check_weight(metric, weight)?;
        self.weights.insert(metric, weight);
        Ok(())
    }

    #[inline]
    pub fn get(&self, metric: Metric) -> f64 {
        self.weights.get(&metric).copied().unwrap_or(0.0)
    }

    pub fn total(&self) -> f64 {
        self.weights.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Metric, f64)> + '_ {
        self.weights.iter().map(|(m, w)| (*m, *w))
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        self.iter()
            .try_for_each(|(metric, weight)| check_weight(metric, weight))
    }

    /// Applies `name=value,name=value` overrides on top of `self`.
    pub fn apply_overrides(mut self, overrides: &str) -> Result<Self, ModelError> {
        for entry in overrides.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (name, value) = entry
                .split_once('=')
                .ok_or_else(|| ModelError::MalformedWeight {
                    entry: entry.to_string(),
                })?;
            let metric: Metric = name.parse()?;
            let weight: f64 = value
                .trim()
                .parse()
                .map_err(|_| ModelError::MalformedWeight {
                    entry: entry.to_string(),
                })?;
            self.set(metric, weight)?;
        }
        Ok(self)
    }
}

fn check_weight(metric: Metric, weight: f64) -> Result<(), ModelError> {
    if weight.is_finite() && weight >= 0.0 {
        Ok(())
    } else {
        Err(ModelError::InvalidWeight {
            metric: metric.to_string(),
            value: weight,
        })
    }
}
