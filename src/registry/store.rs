use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info};

use super::error::RegistryResult;
use super::{
    CanonicalRegistry, CanonicalSource, GapCatalog, GapLookup, KnownGap, SourceLookup, StepMarkers,
    read_json,
};
use crate::config::Config;

/// One consistent set of reference tables.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceData {
    pub sources: CanonicalRegistry,
    pub gaps: GapCatalog,
    pub markers: StepMarkers,
}

impl ReferenceData {
    pub fn new(sources: CanonicalRegistry, gaps: GapCatalog, markers: StepMarkers) -> Self {
        Self {
            sources,
            gaps,
            markers,
        }
    }

    pub fn builtin() -> Self {
        Self::new(
            CanonicalRegistry::builtin(),
            GapCatalog::builtin(),
            StepMarkers::builtin(),
        )
    }

    /// Loads every table named in `config`, using built-ins for the rest.
    pub fn from_config(config: &Config) -> RegistryResult<Self> {
        let sources = match &config.sources_path {
            Some(path) => CanonicalRegistry::load(path)?,
            None => CanonicalRegistry::builtin(),
        };

        let gaps = match &config.gaps_path {
            Some(path) => read_json(path)?,
            None => GapCatalog::builtin_gaps(),
        };
        let domains = match &config.gap_domains_path {
            Some(path) => read_json(path)?,
            None => GapCatalog::builtin_domains(),
        };
        let gaps = GapCatalog::new(gaps, domains)?;

        let markers = match &config.step_markers_path {
            Some(path) => StepMarkers::load(path)?,
            None => StepMarkers::builtin(),
        };

        debug!(
            sources = sources.len(),
            gaps = gaps.gaps().len(),
            domains = gaps.domains().len(),
            markers = markers.phrases().len(),
            "Reference data loaded"
        );

        Ok(Self::new(sources, gaps, markers))
    }
}

impl SourceLookup for ReferenceData {
    fn lookup_source(&self, locator: &str) -> RegistryResult<Option<CanonicalSource>> {
        self.sources.lookup_source(locator)
    }
}

impl GapLookup for ReferenceData {
    fn lookup_relevant_gaps(&self, context: &str) -> RegistryResult<BTreeMap<String, KnownGap>> {
        self.gaps.lookup_relevant_gaps(context)
    }
}

/// Holds the current [`ReferenceData`] and swaps it atomically.
///
/// Readers take an `Arc` snapshot; a replacement never affects snapshots
/// already handed out.
#[derive(Debug)]
pub struct ReferenceStore {
    current: RwLock<Arc<ReferenceData>>,
}

impl ReferenceStore {
    pub fn new(data: ReferenceData) -> Self {
        Self {
            current: RwLock::new(Arc::new(data)),
        }
    }

    #[inline]
    pub fn snapshot(&self) -> Arc<ReferenceData> {
        Arc::clone(&self.current.read())
    }

    /// Installs `data` and returns the previous snapshot.
    pub fn replace(&self, data: ReferenceData) -> Arc<ReferenceData> {
        let next = Arc::new(data);
        let previous = std::mem::replace(&mut *self.current.write(), next);
        info!("Reference data replaced");
        previous
    }
}

impl Default for ReferenceStore {
    fn default() -> Self {
        Self::new(ReferenceData::builtin())
    }
}
