//! Service settings
//!
//! Defines how the Nomen service locates its record store and treats
//! placeholders that nothing resolves.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::resolution::UnresolvedPolicy;

/// Default directory holding organizations, namespaces and schemas.
pub const DEFAULT_STORE_ROOT: &str = "store";

/// Settings for a Nomen deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Root directory of the file-backed record store.
    pub store_root: PathBuf,

    /// Policy applied to placeholders nothing resolves.
    pub unresolved_policy: UnresolvedPolicy,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            store_root: PathBuf::from(DEFAULT_STORE_ROOT),
            unresolved_policy: UnresolvedPolicy::default(),
        }
    }
}

impl ServiceSettings {
    /// Overrides the store root, returning the settings for chaining.
    #[must_use]
    pub fn with_store_root(mut self, store_root: impl Into<PathBuf>) -> Self {
        self.store_root = store_root.into();
        self
    }

    /// Overrides the unresolved policy, returning the settings for chaining.
    #[must_use]
    pub const fn with_policy(mut self, policy: UnresolvedPolicy) -> Self {
        self.unresolved_policy = policy;
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = ServiceSettings::default();
        assert_eq!(settings.store_root, PathBuf::from("store"));
        assert_eq!(settings.unresolved_policy, UnresolvedPolicy::LeaveVerbatim);
    }

    #[test]
    fn test_partial_document_keeps_defaults() {
        let settings: ServiceSettings =
            serde_json::from_str(r#"{"unresolved_policy": "error"}"#).expect("valid settings");
        assert_eq!(settings.unresolved_policy, UnresolvedPolicy::Error);
        assert_eq!(settings.store_root, PathBuf::from(DEFAULT_STORE_ROOT));
    }
}
