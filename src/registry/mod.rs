//! Trusted reference data: canonical sources, known enforcement gaps and
//! reasoning step markers.
//!
//! Evaluators read reference data through the [`SourceLookup`] and
//! [`GapLookup`] traits. A [`ReferenceStore`] hands out immutable
//! [`ReferenceData`] snapshots so a batch sees one consistent view.

mod canonical;
pub mod error;
mod gaps;
mod markers;
mod store;

#[cfg(any(test, feature = "mock"))]
mod mock;


pub use canonical::{ArticleRange, CanonicalRegistry, CanonicalSource};
pub use error::{RegistryError, RegistryResult};
pub use gaps::{GapCatalog, GapDomain, KnownGap};
pub use markers::StepMarkers;
#[cfg(any(test, feature = "mock"))]
pub use mock::UnavailableRegistry;
pub use store::{ReferenceData, ReferenceStore};

use std::collections::BTreeMap;
use std::path::Path;

use serde::de::DeserializeOwned;

/// Resolves a citation locator to its canonical source.
pub trait SourceLookup: Send + Sync {
    /// `Ok(None)` means the locator is unknown; `Err` means the registry
    /// itself could not be consulted.
    fn lookup_source(&self, locator: &str) -> RegistryResult<Option<CanonicalSource>>;
}

/// Selects the known gaps relevant to a query.
pub trait GapLookup: Send + Sync {
    fn lookup_relevant_gaps(&self, context: &str) -> RegistryResult<BTreeMap<String, KnownGap>>;
}

pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> RegistryResult<T> {
    let raw = std::fs::read_to_string(path).map_err(|source| RegistryError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| RegistryError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
