//! Resolution outputs and the unresolved-placeholder policy.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// What to do with a placeholder whose name has no resolved value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum UnresolvedPolicy {
    /// Leave the placeholder text unchanged in the output.
    #[default]
    LeaveVerbatim,
    /// Fail the resolution, naming every unmatched placeholder.
    Error,
}

impl UnresolvedPolicy {
    /// Returns the configuration spelling of the policy.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LeaveVerbatim => "leave-verbatim",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for UnresolvedPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of resolving one template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedOutput {
    /// The substituted string.
    pub value: String,

    /// Placeholder names left in `value` because nothing resolved them.
    pub unresolved: BTreeSet<String>,
}

impl ResolvedOutput {
    /// Creates an output for a template that needed no substitution.
    #[must_use]
    pub fn unchanged(template: &str) -> Self {
        Self {
            value: template.to_string(),
            unresolved: BTreeSet::new(),
        }
    }

    /// Returns true if every placeholder was substituted.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }
}

/// A resource name produced by the resolution pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedResource {
    /// Name of the resource within its schema version.
    pub resource_name: String,

    /// The resource's naming pattern before resolution.
    pub pattern: String,

    /// The resolved resource name.
    pub value: String,

    /// Placeholder names that remain in `value`.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub unresolved: BTreeSet<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_defaults_to_leave_verbatim() {
        assert_eq!(UnresolvedPolicy::default(), UnresolvedPolicy::LeaveVerbatim);
    }

    #[test]
    fn test_policy_serde_spelling() {
        let json = serde_json::to_string(&UnresolvedPolicy::LeaveVerbatim).expect("serialize");
        assert_eq!(json, r#""leave-verbatim""#);

        let policy: UnresolvedPolicy = serde_json::from_str(r#""error""#).expect("deserialize");
        assert_eq!(policy, UnresolvedPolicy::Error);
        assert_eq!(policy.to_string(), "error");
    }

    #[test]
    fn test_unchanged_output_is_complete() {
        let output = ResolvedOutput::unchanged("static-name");
        assert_eq!(output.value, "static-name");
        assert!(output.is_complete());
    }

    #[test]
    fn test_resource_omits_empty_unresolved() {
        let resource = ResolvedResource {
            resource_name: "db".to_string(),
            pattern: "{env}-db".to_string(),
            value: "prod-db".to_string(),
            unresolved: BTreeSet::new(),
        };
        let json = serde_json::to_value(&resource).expect("serialize");
        assert!(json.get("unresolved").is_none());
        assert_eq!(json["resource_name"], "db");
    }
}
