use std::collections::BTreeSet;

use serde::{Deserialize, Deserializer, Serialize};

use super::citation::Citation;
use super::error::ModelError;
use crate::constants::{MAX_CITATION_YEAR, MAX_SNIPPET_CHARS, MIN_CITATION_YEAR};

/// Risk flags an answer may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskFlag {
    JurisdictionAmbiguity,
    TemporalUncertainty,
    EnforcementGap,
    ConflictingNorms,
    InsufficientData,
    CrossBorderComplexity,
    RegulatoryChangePending,
}

/// The narrative part of a response.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Answer {
    #[serde(default)]
    pub summary: String,

    #[serde(default)]
    pub reasoning: String,

    #[serde(default)]
    pub risk_flags: Vec<RiskFlag>,

    #[serde(default)]
    pub confidence: f64,
}

impl Answer {
    pub fn new(summary: impl Into<String>, reasoning: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            reasoning: reasoning.into(),
            risk_flags: Vec::new(),
            confidence: 1.0,
        }
    }
}

/// How much the data behind a gap claim can be trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceLevel {
    Low,
    #[default]
    Medium,
    High,
}

/// A response's claim that formal law and enforcement reality diverge.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EnforcementGapClaim {
    #[serde(default, alias = "formal")]
    pub formal_requirement: String,

    #[serde(default, alias = "reality")]
    pub documented_reality: String,

    /// Missing or `null` percentages decode as 0.
    #[serde(default, deserialize_with = "null_as_zero")]
    pub gap_percentage: f64,

    #[serde(default, rename = "gap_mechanisms", alias = "mechanisms")]
    pub mechanisms: BTreeSet<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_source: Option<String>,

    #[serde(default)]
    pub confidence_level: ConfidenceLevel,
}

impl EnforcementGapClaim {
    pub fn new<I, S>(gap_percentage: f64, mechanisms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            gap_percentage,
            mechanisms: mechanisms.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn with_texts(mut self, formal: impl Into<String>, reality: impl Into<String>) -> Self {
        self.formal_requirement = formal.into();
        self.documented_reality = reality.into();
        self
    }
}

/// A structured legal answer to be scored.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Response {
    #[serde(default)]
    pub answer: Answer,

    #[serde(default)]
    pub citations: Vec<Citation>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enforcement_gap: Option<EnforcementGapClaim>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_id: Option<String>,
}

impl Response {
    pub fn new(answer: Answer, citations: Vec<Citation>) -> Self {
        Self {
            answer,
            citations,
            enforcement_gap: None,
            query_id: None,
        }
    }

    pub fn with_enforcement_gap(mut self, gap: EnforcementGapClaim) -> Self {
        self.enforcement_gap = Some(gap);
        self
    }

    /// Decodes a response from JSON and validates it.
    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        let response: Response = serde_json::from_str(json)?;
        response.validate()?;
        Ok(response)
    }

    /// Checks numeric ranges and size limits.
    ///
    /// Missing citation fields are deliberately not rejected here; the
    /// citation validator reports them as diagnostics.
    pub fn validate(&self) -> Result<(), ModelError> {
        check_unit_range("answer.confidence", self.answer.confidence)?;

        for (i, citation) in self.citations.iter().enumerate() {
            let index = i + 1;
            check_unit_range(&format!("citations[{index}].confidence"), citation.confidence)?;

            if let Some(snippet) = &citation.snippet {
                let len = snippet.chars().count();
                if len > MAX_SNIPPET_CHARS {
                    return Err(ModelError::SnippetTooLong {
                        index,
                        len,
                        max: MAX_SNIPPET_CHARS,
                    });
                }
            }

            if let Some(year) = citation.year
                && !(MIN_CITATION_YEAR..=MAX_CITATION_YEAR).contains(&year)
            {
                return Err(ModelError::YearOutOfRange {
                    index,
                    year,
                    min: MIN_CITATION_YEAR,
                    max: MAX_CITATION_YEAR,
                });
            }
        }

        if let Some(gap) = &self.enforcement_gap {
            let pct = gap.gap_percentage;
            if !pct.is_finite() || !(0.0..=100.0).contains(&pct) {
                return Err(ModelError::OutOfRange {
                    field: "enforcement_gap.gap_percentage".to_string(),
                    value: pct,
                    min: 0.0,
                    max: 100.0,
                });
            }
        }

        Ok(())
    }
}

fn null_as_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or_default())
}

fn check_unit_range(field: &str, value: f64) -> Result<(), ModelError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ModelError::OutOfRange {
            field: field.to_string(),
            value,
            min: 0.0,
            max: 1.0,
        })
    }
}
