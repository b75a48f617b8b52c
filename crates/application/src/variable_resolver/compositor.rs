//! Scope composition
//!
//! Decides which template is authoritative for each name when several scopes
//! define it. Innermost wins. Nothing is resolved here.

use std::collections::{BTreeMap, HashSet};

use nomen_domain::{Environment, Scope};

use crate::error::ResolutionError;

/// The authoritative template for a name, with the scope it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedVariable {
    /// The variable name.
    pub name: String,

    /// The winning template.
    pub template: String,

    /// Tag of the scope that defined `template`.
    pub origin: String,
}

/// Validated, ordered view over a list of scopes (outermost first).
#[derive(Debug, Clone, Copy)]
pub struct ScopeCompositor<'a> {
    scopes: &'a [Scope],
}

impl<'a> ScopeCompositor<'a> {
    /// Validates the scope list.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionError::DuplicateScope`] if a tag appears twice.
    pub fn new(scopes: &'a [Scope]) -> Result<Self, ResolutionError> {
        let mut seen = HashSet::with_capacity(scopes.len());
        for scope in scopes {
            if !seen.insert(scope.tag.as_str()) {
                return Err(ResolutionError::DuplicateScope(scope.tag.clone()));
            }
        }
        Ok(Self { scopes })
    }

    /// Returns the scopes, outermost first.
    #[must_use]
    pub const fn layers(&self) -> &'a [Scope] {
        self.scopes
    }

    /// Returns the authoritative template per name across all scopes.
    #[must_use]
    pub fn composed(&self) -> BTreeMap<String, ComposedVariable> {
        let mut composed = BTreeMap::new();
        for scope in self.scopes {
            for (name, template) in &scope.variables {
                composed.insert(
                    name.clone(),
                    ComposedVariable {
                        name: name.clone(),
                        template: template.clone(),
                        origin: scope.tag.clone(),
                    },
                );
            }
        }
        composed
    }

    /// Returns the tag of the innermost scope defining `name`.
    #[must_use]
    pub fn origin_of(&self, name: &str) -> Option<&'a str> {
        self.scopes
            .iter()
            .rev()
            .find(|scope| scope.variables.contains_key(name))
            .map(|scope| scope.tag.as_str())
    }
}

/// The input of one resolution stage: a scope layered on an environment.
#[derive(Debug, Clone)]
pub struct WorkingSet {
    /// Tag of the scope being resolved.
    pub tag: String,

    /// Variables of the scope, still unresolved.
    pub pending: BTreeMap<String, ComposedVariable>,

    /// Values from enclosing scopes that the scope does not override.
    pub environment: Environment,
}

/// Layers `scope` on top of an already resolved environment.
///
/// Names the scope redefines are dropped from the inherited environment, so
/// a reference to them inside the scope always sees the new definition.
#[must_use]
pub fn compose_layer(base: &Environment, scope: &Scope) -> WorkingSet {
    let mut environment = base.clone();
    let pending = scope
        .variables
        .iter()
        .map(|(name, template)| {
            environment.remove(name);
            (
                name.clone(),
                ComposedVariable {
                    name: name.clone(),
                    template: template.clone(),
                    origin: scope.tag.clone(),
                },
            )
        })
        .collect();

    WorkingSet {
        tag: scope.tag.clone(),
        pending,
        environment,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use nomen_domain::ResolvedVariable;

    #[test]
    fn test_innermost_definition_wins() {
        let scopes = [
            Scope::organization([("a", "X"), ("b", "outer")]),
            Scope::namespace([("a", "Y")]),
        ];
        let compositor = ScopeCompositor::new(&scopes).expect("distinct tags");
        let composed = compositor.composed();

        assert_eq!(composed["a"].template, "Y");
        assert_eq!(composed["a"].origin, "namespace");
        assert_eq!(composed["b"].origin, "organization");
        assert_eq!(compositor.origin_of("a"), Some("namespace"));
        assert_eq!(compositor.origin_of("missing"), None);
    }

    #[test]
    fn test_duplicate_scope_rejected() {
        let scopes = [
            Scope::organization([("a", "1")]),
            Scope::namespace([("b", "2")]),
            Scope::organization([("c", "3")]),
        ];
        let err = ScopeCompositor::new(&scopes).expect_err("duplicate tag");
        assert_eq!(err, ResolutionError::DuplicateScope("organization".to_string()));
    }

    #[test]
    fn test_compose_layer_drops_overridden_names() {
        let base: Environment = [
            ResolvedVariable::new("env", "prod", "organization"),
            ResolvedVariable::new("region", "eu", "organization"),
        ]
        .into_iter()
        .collect();

        let working = compose_layer(&base, &Scope::namespace([("env", "dev")]));

        assert_eq!(working.tag, "namespace");
        assert!(working.pending.contains_key("env"));
        assert!(!working.environment.contains("env"));
        assert_eq!(working.environment.value("region"), Some("eu"));
        // the snapshot itself is untouched
        assert_eq!(base.value("env"), Some("prod"));
    }
}
