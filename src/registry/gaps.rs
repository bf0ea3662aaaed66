use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::{RegistryError, RegistryResult};
use super::{GapLookup, read_json};

/// A documented divergence between formal law and enforcement reality.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnownGap {
    pub formal: String,
    pub reality: String,
    pub gap_percentage: f64,
    pub mechanisms: BTreeSet<String>,
}

impl KnownGap {
    pub fn new<I, S>(
        formal: impl Into<String>,
        reality: impl Into<String>,
        gap_percentage: f64,
        mechanisms: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            formal: formal.into(),
            reality: reality.into(),
            gap_percentage,
            mechanisms: mechanisms.into_iter().map(Into::into).collect(),
        }
    }
}

/// Maps query keywords to the known gaps of one legal domain.
///
/// A gap belongs to the domain when its id contains `marker`
/// (case-insensitive); it is relevant to a query when the lowercased query
/// contains any of `keywords`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GapDomain {
    pub name: String,
    pub marker: String,
    pub keywords: Vec<String>,
}

impl GapDomain {
    pub fn new<I, S>(name: impl Into<String>, marker: impl Into<String>, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            marker: marker.into(),
            keywords: keywords.into_iter().map(Into::into).collect(),
        }
    }

    fn normalized(self) -> RegistryResult<Self> {
        let marker = self.marker.trim().to_lowercase();
        let keywords: Vec<String> = self
            .keywords
            .iter()
            .map(|k| k.trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();

        if marker.is_empty() || keywords.is_empty() {
            return Err(RegistryError::InvalidGapDomain { name: self.name });
        }

        Ok(Self {
            name: self.name,
            marker,
            keywords,
        })
    }

    fn covers(&self, gap_id_lower: &str, query_lower: &str) -> bool {
        gap_id_lower.contains(&self.marker)
            && self.keywords.iter().any(|k| query_lower.contains(k.as_str()))
    }
}

/// Known gaps plus the domain table used to select relevant ones.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GapCatalog {
    gaps: BTreeMap<String, KnownGap>,
    domains: Vec<GapDomain>,
}

impl GapCatalog {
    pub fn new(gaps: BTreeMap<String, KnownGap>, domains: Vec<GapDomain>) -> RegistryResult<Self> {
        let domains = domains
            .into_iter()
            .map(GapDomain::normalized)
            .collect::<RegistryResult<Vec<_>>>()?;
        Ok(Self { gaps, domains })
    }

    pub fn builtin_gaps() -> BTreeMap<String, KnownGap> {
        BTreeMap::from([
            (
                "AR_LAB_REGISTRATION".to_string(),
                KnownGap::new(
                    "100% registration required within 5 days",
                    "42% actually registered (INDEC Q4 2024)",
                    58.0,
                    ["administrative_burden", "enforcement_capacity"],
                ),
            ),
            (
                "AR_CORP_INTEGRITY".to_string(),
                KnownGap::new(
                    "100% integrity programs required (Ley 27.401)",
                    "31% full implementation (OEADE 2025)",
                    69.0,
                    ["cost_barriers", "lack_enforcement"],
                ),
            ),
        ])
    }

    pub fn builtin_domains() -> Vec<GapDomain> {
        vec![
            GapDomain::new("labor", "lab", ["trabajo", "labor", "registro", "empleado"]),
            GapDomain::new("corporate", "corp", ["integridad", "compliance", "27.401"]),
        ]
    }

    /// Built-in gaps and domain table.
    pub fn builtin() -> Self {
        Self {
            gaps: Self::builtin_gaps(),
            domains: Self::builtin_domains(),
        }
    }

    /// Loads gaps and domains from two JSON files.
    pub fn load(gaps_path: &Path, domains_path: &Path) -> RegistryResult<Self> {
        Self::new(read_json(gaps_path)?, read_json(domains_path)?)
    }

    pub fn gaps(&self) -> &BTreeMap<String, KnownGap> {
        &self.gaps
    }

    pub fn domains(&self) -> &[GapDomain] {
        &self.domains
    }

    /// Known gaps whose domain matches a keyword in `context`, keyed by id.
    pub fn relevant_gaps(&self, context: &str) -> BTreeMap<String, KnownGap> {
        let query_lower = context.to_lowercase();

        self.gaps
            .iter()
            .filter(|(id, _)| {
                let id_lower = id.to_lowercase();
                self.domains.iter().any(|d| d.covers(&id_lower, &query_lower))
            })
            .map(|(id, gap)| (id.clone(), gap.clone()))
            .collect()
    }
}

impl GapLookup for GapCatalog {
    fn lookup_relevant_gaps(&self, context: &str) -> RegistryResult<BTreeMap<String, KnownGap>> {
        Ok(self.relevant_gaps(context))
    }
}
