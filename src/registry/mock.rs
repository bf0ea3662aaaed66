use std::collections::BTreeMap;

use super::error::{RegistryError, RegistryResult};
use super::{CanonicalSource, GapLookup, KnownGap, SourceLookup};

/// Registry whose every lookup fails, for exercising capability failures.
#[derive(Debug, Clone)]
pub struct UnavailableRegistry {
    reason: String,
}

impl UnavailableRegistry {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    fn error(&self) -> RegistryError {
        RegistryError::Unavailable {
            reason: self.reason.clone(),
        }
    }
}

impl Default for UnavailableRegistry {
    fn default() -> Self {
        Self::new("registry offline")
    }
}

impl SourceLookup for UnavailableRegistry {
    fn lookup_source(&self, _locator: &str) -> RegistryResult<Option<CanonicalSource>> {
        Err(self.error())
    }
}

impl GapLookup for UnavailableRegistry {
    fn lookup_relevant_gaps(&self, _context: &str) -> RegistryResult<BTreeMap<String, KnownGap>> {
        Err(self.error())
    }
}
