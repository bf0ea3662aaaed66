use std::sync::{Arc, LazyLock};

use regex::Regex;
use tracing::debug;

use super::types::{MetricReport, ratio};
use crate::model::Citation;
use crate::registry::{RegistryResult, SourceLookup};

static LAW_TITLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:Ley|Law)\s+[0-9]+(?:\.[0-9]+)*").expect("law title pattern is valid")
});

static ARTICLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bArt(?:ículo|iculo|icle|\.)?\s*[0-9]+(?:\s*bis)?(?:\s*ter)?")
        .expect("article pattern is valid")
});

static LEADING_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+").expect("number pattern is valid"));

/// Checks citations for required fields, statute formatting and agreement
/// with the canonical-source registry.
#[derive(Clone)]
pub struct CitationValidator {
    sources: Arc<dyn SourceLookup>,
}

impl std::fmt::Debug for CitationValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CitationValidator").finish_non_exhaustive()
    }
}

impl CitationValidator {
    pub fn new(sources: Arc<dyn SourceLookup>) -> Self {
        Self { sources }
    }

    /// Precision is the share of citations with no errors. Every error is
    /// prefixed with the citation's 1-based position.
    pub fn validate(&self, citations: &[Citation]) -> RegistryResult<MetricReport> {
        if citations.is_empty() {
            return Ok(MetricReport::insufficient("No citations provided"));
        }

        let mut errors = Vec::new();
        let mut correct = 0usize;

        for (i, citation) in citations.iter().enumerate() {
            let citation_errors = self.check(citation)?;
            if citation_errors.is_empty() {
                correct += 1;
            } else {
                errors.extend(
                    citation_errors
                        .into_iter()
                        .map(|err| format!("Citation {}: {err}", i + 1)),
                );
            }
        }

        debug!(
            total = citations.len(),
            correct,
            errors = errors.len(),
            "Citations validated"
        );

        Ok(MetricReport::new(ratio(correct, citations.len()), errors))
    }

    /// Errors for one citation, unprefixed. Missing required fields
    /// short-circuit the remaining checks.
    pub fn check(&self, citation: &Citation) -> RegistryResult<Vec<String>> {
        let missing = citation.missing_fields();
        if !missing.is_empty() {
            return Ok(missing
                .into_iter()
                .map(|field| format!("Missing required field: {field}"))
                .collect());
        }

        let mut errors = Vec::new();
        let section = citation.section();

        if citation.kind.is_statute() {
            if !LAW_TITLE_RE.is_match(&citation.title) {
                errors.push("Invalid law citation format".to_string());
            }
            if let Some(section) = section
                && !ARTICLE_RE.is_match(section)
            {
                errors.push("Invalid article section format".to_string());
            }
        }

        if let Some(source) = self.sources.lookup_source(&citation.locator)? {
            if citation.jurisdiction != source.jurisdiction {
                errors.push(format!(
                    "Jurisdiction mismatch: {} vs {}",
                    citation.jurisdiction, source.jurisdiction
                ));
            }

            if let Some(article) = section.and_then(leading_article)
                && !source.articles.contains(article)
            {
                errors.push(format!(
                    "Article {article} does not exist in {}",
                    source.title
                ));
            }
        }

        Ok(errors)
    }
}

/// First ASCII integer in a section locator. Values too large for `u64` saturate.
fn leading_article(section: &str) -> Option<u64> {
    LEADING_NUMBER_RE
        .find(section)
        .map(|m| m.as_str().parse().unwrap_or(u64::MAX))
}
