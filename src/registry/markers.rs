use std::path::Path;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use super::error::{RegistryError, RegistryResult};
use super::read_json;

/// Ordered discourse connectives used to split reasoning into steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StepMarkers {
    phrases: Vec<String>,
}

impl Default for StepMarkers {
    fn default() -> Self {
        Self::builtin()
    }
}

impl StepMarkers {
    pub fn new<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            phrases: phrases
                .into_iter()
                .map(Into::into)
                .filter(|p: &String| !p.trim().is_empty())
                .collect(),
        }
    }

    /// Spanish connectives followed by their English counterparts.
    pub fn builtin() -> Self {
        Self::new([
            "En primer lugar",
            "Por otra parte",
            "Asimismo",
            "En consecuencia",
            "Por lo tanto",
            "Dado que",
            "Considerando que",
            "First of all",
            "On the other hand",
            "Furthermore",
            "Consequently",
            "Therefore",
            "Given that",
            "Considering that",
        ])
    }

    pub fn load(path: &Path) -> RegistryResult<Self> {
        let phrases: Vec<String> = read_json(path)?;
        Ok(Self::new(phrases))
    }

    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }

    /// Case-insensitive literal matchers, in marker order.
    pub fn compile(&self) -> RegistryResult<Vec<Regex>> {
        self.phrases
            .iter()
            .map(|phrase| {
                RegexBuilder::new(&regex::escape(phrase.trim()))
                    .case_insensitive(true)
                    .build()
                    .map_err(|e| RegistryError::InvalidMarker {
                        phrase: phrase.clone(),
                        reason: e.to_string(),
                    })
            })
            .collect()
    }
}
