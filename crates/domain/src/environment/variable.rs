//! Resolved variables and the environment that accumulates them.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// A variable whose template has been fully evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedVariable {
    /// The variable name.
    pub name: String,

    /// The resolved value.
    pub value: String,

    /// Tag of the scope that defined the winning template.
    pub scope: String,

    /// Placeholder names left verbatim in `value`.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub unresolved: BTreeSet<String>,
}

impl ResolvedVariable {
    /// Creates a resolved variable.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        value: impl Into<String>,
        scope: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            scope: scope.into(),
            unresolved: BTreeSet::new(),
        }
    }

    /// Records the placeholder names left verbatim in the value.
    #[must_use]
    pub fn with_unresolved(mut self, unresolved: BTreeSet<String>) -> Self {
        self.unresolved = unresolved;
        self
    }

    /// Returns true if the value contains no unresolved placeholders.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }
}

/// Working map of variable name to fully resolved value.
///
/// An environment is a snapshot: resolving a further scope produces a new
/// environment and leaves the one it started from untouched, so a resolved
/// organization environment can be shared across namespace resolutions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Environment {
    entries: BTreeMap<String, ResolvedVariable>,
}

impl Environment {
    /// Creates an empty environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the resolved variable for a name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ResolvedVariable> {
        self.entries.get(name)
    }

    /// Returns just the resolved value for a name.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(|v| v.value.as_str())
    }

    /// Returns true if the name has a resolved value.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Inserts a resolved variable, returning the entry it replaced.
    pub fn insert(&mut self, variable: ResolvedVariable) -> Option<ResolvedVariable> {
        self.entries.insert(variable.name.clone(), variable)
    }

    /// Removes a name from the environment.
    pub fn remove(&mut self, name: &str) -> Option<ResolvedVariable> {
        self.entries.remove(name)
    }

    /// Returns the number of resolved variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing has been resolved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates resolved variables in name order.
    pub fn iter(&self) -> impl Iterator<Item = &ResolvedVariable> {
        self.entries.values()
    }

    /// Returns a plain name to value map.
    #[must_use]
    pub fn to_value_map(&self) -> BTreeMap<String, String> {
        self.entries
            .iter()
            .map(|(name, var)| (name.clone(), var.value.clone()))
            .collect()
    }
}

impl FromIterator<ResolvedVariable> for Environment {
    fn from_iter<T: IntoIterator<Item = ResolvedVariable>>(iter: T) -> Self {
        let mut env = Self::new();
        for variable in iter {
            env.insert(variable);
        }
        env
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_insert_replaces_and_returns_previous() {
        let mut env = Environment::new();
        assert!(env.insert(ResolvedVariable::new("env", "dev", "organization")).is_none());

        let previous = env
            .insert(ResolvedVariable::new("env", "prod", "namespace"))
            .expect("previous entry");
        assert_eq!(previous.value, "dev");

        let current = env.get("env").expect("entry");
        assert_eq!(current.value, "prod");
        assert_eq!(current.scope, "namespace");
        assert_eq!(env.len(), 1);
    }

    #[test]
    fn test_value_map_is_sorted() {
        let env: Environment = [
            ResolvedVariable::new("region", "eu", "organization"),
            ResolvedVariable::new("app", "web", "namespace"),
        ]
        .into_iter()
        .collect();

        let names: Vec<_> = env.to_value_map().into_keys().collect();
        assert_eq!(names, vec!["app", "region"]);
    }

    #[test]
    fn test_serializes_as_map() {
        let env: Environment = [ResolvedVariable::new("a", "1", "request")]
            .into_iter()
            .collect();
        let json = serde_json::to_value(&env).expect("serialize");
        assert_eq!(json["a"]["value"], "1");
    }
}
