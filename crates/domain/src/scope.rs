//! Variable scopes
//!
//! A scope is one named layer of variables (organization, namespace, request).
//! Each variable maps a name to a template that may itself reference other
//! variables through `{name}` placeholders.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Variable name to template mapping.
///
/// Ordered so that serialized scopes are stable on disk. Resolution order never
/// depends on this ordering.
pub type VariableMap = BTreeMap<String, String>;

/// A named layer of variable templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scope {
    /// Scope tag, unique within one resolution request.
    pub tag: String,

    /// Variable templates defined by this scope.
    #[serde(default)]
    pub variables: VariableMap,
}

impl Scope {
    /// Tag of the outermost, organization-wide scope.
    pub const ORGANIZATION: &'static str = "organization";

    /// Tag of the namespace scope.
    pub const NAMESPACE: &'static str = "namespace";

    /// Tag of the per-request scope.
    pub const REQUEST: &'static str = "request";

    /// Creates an empty scope with the given tag.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            variables: VariableMap::new(),
        }
    }

    /// Creates a scope from any iterator of `(name, template)` pairs.
    ///
    /// Later pairs with the same name replace earlier ones.
    #[must_use]
    pub fn from_variables<I, K, V>(tag: impl Into<String>, variables: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            tag: tag.into(),
            variables: variables
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Creates an organization scope.
    #[must_use]
    pub fn organization<I, K, V>(variables: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::from_variables(Self::ORGANIZATION, variables)
    }

    /// Creates a namespace scope.
    #[must_use]
    pub fn namespace<I, K, V>(variables: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::from_variables(Self::NAMESPACE, variables)
    }

    /// Creates a request scope.
    #[must_use]
    pub fn request<I, K, V>(variables: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::from_variables(Self::REQUEST, variables)
    }

    /// Adds a variable, returning the scope for chaining.
    #[must_use]
    pub fn with_variable(mut self, name: impl Into<String>, template: impl Into<String>) -> Self {
        self.variables.insert(name.into(), template.into());
        self
    }

    /// Sets a variable, returning the template it replaced.
    pub fn set_variable(
        &mut self,
        name: impl Into<String>,
        template: impl Into<String>,
    ) -> Option<String> {
        self.variables.insert(name.into(), template.into())
    }

    /// Returns the template of a variable.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.variables.get(name).map(String::as_str)
    }

    /// Returns the number of variables in the scope.
    #[must_use]
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    /// Returns true if the scope defines no variables.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Checks that the tag is non-empty and every variable name could be
    /// referenced by a placeholder.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidScopeTag`] for a blank tag and
    /// [`DomainError::InvalidVariableName`] for an empty name or one
    /// containing `}`.
    pub fn validate(&self) -> DomainResult<()> {
        if self.tag.trim().is_empty() {
            return Err(DomainError::InvalidScopeTag(self.tag.clone()));
        }

        if let Some(name) = self
            .variables
            .keys()
            .find(|name| name.is_empty() || name.contains('}'))
        {
            return Err(DomainError::InvalidVariableName(name.clone()));
        }

        Ok(())
    }
}
