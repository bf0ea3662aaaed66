use serde::{Deserialize, Serialize};

/// Score in `[0, 1]` with the diagnostics that explain it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MetricReport {
    pub score: f64,
    pub diagnostics: Vec<String>,
}

impl MetricReport {
    pub fn new(score: f64, diagnostics: Vec<String>) -> Self {
        Self { score, diagnostics }
    }

    /// Score 0.0 with a single explanatory message.
    pub fn insufficient(message: impl Into<String>) -> Self {
        Self::new(0.0, vec![message.into()])
    }

    #[inline]
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// `numerator / denominator`, or `0.0` when there is nothing to divide.
#[inline]
pub(crate) fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}
