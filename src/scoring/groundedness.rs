use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::types::{MetricReport, ratio};
use crate::constants::{MAX_GROUNDING_OVERLAP, MIN_STATEMENT_CHARS};
use crate::model::Citation;

static SENTENCE_END_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]").expect("sentence pattern is valid"));

static WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w+").expect("word pattern is valid"));

/// Deontic verbs, citation references and reporting phrases, Spanish then English.
static LEGAL_ASSERTION_RES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)(establece que|dispone que|requiere que|prohíbe|prohibe|permite)",
        r"(?i)(según el artículo|conforme al|de acuerdo con)",
        r"(?i)(la ley establece|el decreto dispone|la resolución indica)",
        r"(?i)(establishes that|provides that|requires that|prohibits|permits|allows)",
        r"(?i)(according to article|pursuant to|in accordance with|under article)",
        r"(?i)(the law establishes|the law provides|the decree provides|the resolution states)",
    ]
    .into_iter()
    .map(|pattern| Regex::new(pattern).expect("legal assertion pattern is valid"))
    .collect()
});

/// Checks that the normative statements of a summary are backed by the
/// wording of citation snippets.
#[derive(Debug, Clone, Copy, Default)]
pub struct GroundednessEvaluator;

impl GroundednessEvaluator {
    pub fn new() -> Self {
        Self
    }

    pub fn evaluate(&self, summary: &str, citations: &[Citation]) -> MetricReport {
        if summary.is_empty() {
            return MetricReport::insufficient("No summary provided");
        }

        let statements = self.extract_statements(summary);
        let snippets: Vec<HashSet<String>> = citations
            .iter()
            .filter_map(Citation::snippet)
            .map(tokens)
            .collect();

        let mut ungrounded = Vec::new();
        let mut grounded = 0usize;

        for statement in &statements {
            if is_grounded(statement, &snippets) {
                grounded += 1;
            } else {
                ungrounded.push(statement.to_string());
            }
        }

        debug!(
            statements = statements.len(),
            grounded,
            snippets = snippets.len(),
            "Groundedness evaluated"
        );

        MetricReport::new(ratio(grounded, statements.len()), ungrounded)
    }

    /// Sentences that make a legal assertion, in summary order.
    pub fn extract_statements<'a>(&self, summary: &'a str) -> Vec<&'a str> {
        SENTENCE_END_RE
            .split(summary)
            .map(str::trim)
            .filter(|sentence| sentence.chars().count() >= MIN_STATEMENT_CHARS)
            .filter(|sentence| LEGAL_ASSERTION_RES.iter().any(|re| re.is_match(sentence)))
            .collect()
    }
}

fn tokens(text: &str) -> HashSet<String> {
    WORD_RE
        .find_iter(&text.to_lowercase())
        .map(|m| m.as_str().to_string())
        .collect()
}

fn is_grounded(statement: &str, snippets: &[HashSet<String>]) -> bool {
    let words = tokens(statement);
    let required = MAX_GROUNDING_OVERLAP.min(words.len() / 2);

    snippets
        .iter()
        .any(|snippet| words.intersection(snippet).count() >= required)
}
