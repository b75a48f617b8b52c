//! Organization records.

use serde::{Deserialize, Serialize};

use crate::id::generate_id;
use crate::scope::{Scope, VariableMap};

/// A tenant. Its variables form the outermost scope of every resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    /// Unique identifier.
    pub id: String,

    /// Display name, unique across organizations.
    pub name: String,

    /// Organization-wide variable templates.
    #[serde(default, rename = "vars", alias = "variables")]
    pub variables: VariableMap,
}

impl Organization {
    /// Creates an organization with a fresh identifier and no variables.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: generate_id(),
            name: name.into(),
            variables: VariableMap::new(),
        }
    }

    /// Adds a variable, returning the organization for chaining.
    #[must_use]
    pub fn with_variable(mut self, name: impl Into<String>, template: impl Into<String>) -> Self {
        self.variables.insert(name.into(), template.into());
        self
    }

    /// Returns the organization's variables as an organization scope.
    #[must_use]
    pub fn scope(&self) -> Scope {
        Scope::organization(self.variables.clone())
    }
}
