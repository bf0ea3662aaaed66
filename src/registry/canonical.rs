use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{SourceLookup, read_json};
use super::error::{RegistryError, RegistryResult};
use crate::model::Jurisdiction;

/// Inclusive range of article numbers an instrument contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRange {
    pub first: u32,
    pub last: u32,
}

impl ArticleRange {
    pub const fn new(first: u32, last: u32) -> Self {
        Self { first, last }
    }

    #[inline]
    pub fn contains(&self, article: u64) -> bool {
        (u64::from(self.first)..=u64::from(self.last)).contains(&article)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.first > self.last
    }
}

/// Trusted registry entry for a named legal instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalSource {
    pub title: String,
    pub articles: ArticleRange,
    pub jurisdiction: Jurisdiction,
    pub year: i32,
}

/// Immutable locator → [`CanonicalSource`] table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CanonicalRegistry {
    sources: HashMap<String, CanonicalSource>,
}

impl CanonicalRegistry {
    pub fn new(sources: HashMap<String, CanonicalSource>) -> RegistryResult<Self> {
        for (locator, source) in &sources {
            if source.articles.is_empty() {
                return Err(RegistryError::InvalidArticleRange {
                    locator: locator.clone(),
                    first: source.articles.first,
                    last: source.articles.last,
                });
            }
        }
        Ok(Self { sources })
    }

    /// Built-in reference entries.
    pub fn builtin() -> Self {
        let sources = HashMap::from([
            (
                "AR_L27401".to_string(),
                CanonicalSource {
                    title: "Ley 27.401 - Responsabilidad Penal Empresaria".to_string(),
                    articles: ArticleRange::new(1, 39),
                    jurisdiction: Jurisdiction::Ar,
                    year: 2017,
                },
            ),
            (
                "AR_LCT".to_string(),
                CanonicalSource {
                    title: "Ley de Contrato de Trabajo".to_string(),
                    articles: ArticleRange::new(1, 277),
                    jurisdiction: Jurisdiction::Ar,
                    year: 1974,
                },
            ),
        ]);
        Self { sources }
    }

    pub fn from_json(json: &str) -> RegistryResult<Self> {
        Self::new(serde_json::from_str(json)?)
    }

    /// Loads a registry from a JSON object keyed by locator.
    pub fn load(path: &Path) -> RegistryResult<Self> {
        let registry = Self::new(read_json(path)?)?;
        debug!(path = %path.display(), sources = registry.len(), "Canonical sources loaded");
        Ok(registry)
    }

    #[inline]
    pub fn get(&self, locator: &str) -> Option<&CanonicalSource> {
        self.sources.get(locator)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl SourceLookup for CanonicalRegistry {
    fn lookup_source(&self, locator: &str) -> RegistryResult<Option<CanonicalSource>> {
        Ok(self.get(locator).cloned())
    }
}
