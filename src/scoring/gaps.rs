use std::sync::Arc;

use tracing::debug;

use super::types::{MetricReport, ratio};
use crate::constants::GAP_TOLERANCE_POINTS;
use crate::model::EnforcementGapClaim;
use crate::registry::{GapLookup, KnownGap, RegistryResult};

/// Compares predicted enforcement-gap claims with the known gaps relevant to
/// a query.
#[derive(Clone)]
pub struct GapDetectionEvaluator {
    gaps: Arc<dyn GapLookup>,
}

impl std::fmt::Debug for GapDetectionEvaluator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GapDetectionEvaluator").finish_non_exhaustive()
    }
}

impl GapDetectionEvaluator {
    pub fn new(gaps: Arc<dyn GapLookup>) -> Self {
        Self { gaps }
    }

    /// Detection rate over the relevant known gaps; undetected ids are listed
    /// as `Missed gap: <id>` in id order.
    ///
    /// With no relevant known gap there is nothing to miss, so the rate is 1.0.
    pub fn evaluate(
        &self,
        predicted: &[EnforcementGapClaim],
        context: &str,
    ) -> RegistryResult<MetricReport> {
        let relevant = self.gaps.lookup_relevant_gaps(context)?;
        if relevant.is_empty() {
            return Ok(MetricReport::new(1.0, Vec::new()));
        }

        let missed: Vec<String> = relevant
            .iter()
            .filter(|(_, known)| !is_detected(known, predicted))
            .map(|(id, _)| format!("Missed gap: {id}"))
            .collect();
        let detected = relevant.len() - missed.len();

        debug!(
            relevant = relevant.len(),
            detected,
            predicted = predicted.len(),
            "Gap detection evaluated"
        );

        Ok(MetricReport::new(ratio(detected, relevant.len()), missed))
    }
}

/// A known gap is detected by any claim within the percentage tolerance or
/// sharing at least one mechanism with it.
pub(crate) fn is_detected(known: &KnownGap, predicted: &[EnforcementGapClaim]) -> bool {
    predicted.iter().any(|claim| {
        (known.gap_percentage - claim.gap_percentage).abs() < GAP_TOLERANCE_POINTS
            || !known.mechanisms.is_disjoint(&claim.mechanisms)
    })
}
