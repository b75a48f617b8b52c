//! Namespace records.

use serde::{Deserialize, Serialize};

use crate::id::generate_id;
use crate::scope::{Scope, VariableMap};

/// A namespace within an organization, bound to one schema version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Namespace {
    /// Unique identifier.
    pub id: String,

    /// Name, unique within the organization.
    pub name: String,

    /// Owning organization.
    pub organization_id: String,

    /// Namespace variable templates; may reference organization variables.
    #[serde(default)]
    pub variables: VariableMap,

    /// Schema whose resources this namespace names.
    pub schema_id: String,

    /// Version of that schema in use.
    pub schema_version: u32,
}

impl Namespace {
    /// Creates a namespace with a fresh identifier and no variables.
    #[must_use]
    pub fn new(
        organization_id: impl Into<String>,
        name: impl Into<String>,
        schema_id: impl Into<String>,
        schema_version: u32,
    ) -> Self {
        Self {
            id: generate_id(),
            name: name.into(),
            organization_id: organization_id.into(),
            variables: VariableMap::new(),
            schema_id: schema_id.into(),
            schema_version,
        }
    }

    /// Adds a variable, returning the namespace for chaining.
    #[must_use]
    pub fn with_variable(mut self, name: impl Into<String>, template: impl Into<String>) -> Self {
        self.variables.insert(name.into(), template.into());
        self
    }

    /// Returns the namespace's variables as a namespace scope.
    #[must_use]
    pub fn scope(&self) -> Scope {
        Scope::namespace(self.variables.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_uses_namespace_tag() {
        let ns = Namespace::new("org-1", "payments", "schema-1", 2).with_variable("app", "pay");
        let scope = ns.scope();
        assert_eq!(scope.tag, Scope::NAMESPACE);
        assert_eq!(scope.get("app"), Some("pay"));
        assert_eq!(ns.schema_version, 2);
        assert_eq!(ns.organization_id, "org-1");
    }
}
