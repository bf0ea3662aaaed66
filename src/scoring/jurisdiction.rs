use crate::model::Response;

use super::types::ratio;

/// Share of citation jurisdictions that are recognized values.
#[derive(Debug, Clone, Copy, Default)]
pub struct JurisdictionScorer;

impl JurisdictionScorer {
    pub fn new() -> Self {
        Self
    }

    /// Citations without a jurisdiction are left out of the ratio; if none
    /// has one the score is 0.0.
    pub fn evaluate(&self, response: &Response) -> f64 {
        let (present, recognized) = response
            .citations
            .iter()
            .map(|c| &c.jurisdiction)
            .filter(|j| !j.is_missing())
            .fold((0usize, 0usize), |(present, recognized), j| {
                (present + 1, recognized + usize::from(j.is_recognized()))
            });

        ratio(recognized, present)
    }
}
