//! Variable resolution engine
//!
//! Resolves scopes one stage at a time, outermost first. Inside a stage the
//! scope's variables are evaluated in dependency order against everything
//! resolved so far; the finished environment then feeds the next stage.

use std::collections::{BTreeMap, BTreeSet};

use nomen_domain::{Environment, ResolvedOutput, ResolvedVariable, Scope, UnresolvedPolicy};
use tracing::{debug, warn};

use super::compositor::{ScopeCompositor, compose_layer};
use super::graph::DependencyGraph;
use super::substitution::substitute;
use crate::error::ResolutionError;

/// Outcome of resolving one scope on top of an environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeResolution {
    /// Tag of the resolved scope.
    pub tag: String,

    /// Inherited values plus the scope's own, now resolved.
    pub environment: Environment,

    /// The order the scope's variables were evaluated in.
    pub order: Vec<String>,
}

impl ScopeResolution {
    /// Returns the scope's variables whose values still hold placeholders,
    /// with the names left in each.
    #[must_use]
    pub fn unresolved(&self) -> BTreeMap<&str, &BTreeSet<String>> {
        self.order
            .iter()
            .filter_map(|name| self.environment.get(name))
            .filter(|var| !var.is_complete())
            .map(|var| (var.name.as_str(), &var.unresolved))
            .collect()
    }
}

/// The variable resolution engine.
///
/// Holds no state besides the policy applied to final templates, so one
/// resolver can serve any number of requests concurrently.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VariableResolver {
    policy: UnresolvedPolicy,
}

impl VariableResolver {
    /// Creates a resolver applying `policy` to final templates.
    #[must_use]
    pub const fn new(policy: UnresolvedPolicy) -> Self {
        Self { policy }
    }

    /// Returns the unresolved-placeholder policy.
    #[must_use]
    pub const fn policy(&self) -> UnresolvedPolicy {
        self.policy
    }

    /// Resolves every variable of `scope` on top of `base`.
    ///
    /// References to names neither in `scope` nor in `base` are left
    /// verbatim and reported through [`ScopeResolution::unresolved`]; they
    /// never fail the scope, whatever the policy.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionError::CyclicReference`] if the scope's variables
    /// form a cycle. No part of the scope is resolved in that case.
    pub fn resolve_scope(
        &self,
        base: &Environment,
        scope: &Scope,
    ) -> Result<ScopeResolution, ResolutionError> {
        let working = compose_layer(base, scope);
        let graph = DependencyGraph::build(&working.pending);

        let order = graph.topological_order().map_err(|cycle| {
            warn!(scope = %working.tag, members = ?cycle.members, "Cyclic variable reference");
            ResolutionError::CyclicReference {
                scope: working.tag.clone(),
                members: cycle.members,
            }
        })?;

        let mut environment = working.environment;
        for name in &order {
            let Some(variable) = working.pending.get(name) else {
                continue;
            };
            let output = substitute(
                &variable.template,
                &environment,
                UnresolvedPolicy::LeaveVerbatim,
            )?;
            environment.insert(
                ResolvedVariable::new(name, output.value, &variable.origin)
                    .with_unresolved(output.unresolved),
            );
        }

        debug!(scope = %working.tag, variables = order.len(), "Scope resolved");

        Ok(ScopeResolution {
            tag: working.tag,
            environment,
            order,
        })
    }

    /// Resolves scopes outermost first, each on top of the previous result.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionError::DuplicateScope`] before any work if a tag
    /// repeats, or the first error of any scope.
    pub fn resolve_scopes(&self, scopes: &[Scope]) -> Result<Environment, ResolutionError> {
        let compositor = ScopeCompositor::new(scopes)?;

        compositor
            .layers()
            .iter()
            .try_fold(Environment::new(), |environment, scope| {
                self.resolve_scope(&environment, scope)
                    .map(|resolution| resolution.environment)
            })
    }

    /// Resolves `template` against the given scopes.
    ///
    /// # Errors
    ///
    /// Returns any error from [`Self::resolve_scopes`], or
    /// [`ResolutionError::UnresolvedPlaceholder`] under the `error` policy.
    pub fn resolve(
        &self,
        template: &str,
        scopes: &[Scope],
    ) -> Result<ResolvedOutput, ResolutionError> {
        let environment = self.resolve_scopes(scopes)?;
        self.substitute(template, &environment)
    }

    /// Substitutes `template` against an already resolved environment.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionError::UnresolvedPlaceholder`] under the `error`
    /// policy.
    pub fn substitute(
        &self,
        template: &str,
        environment: &Environment,
    ) -> Result<ResolvedOutput, ResolutionError> {
        substitute(template, environment, self.policy)
    }
}

/// Resolves `template` against `scopes` (outermost first) under `policy`.
///
/// # Examples
///
/// ```
/// use nomen_application::variable_resolver::resolve;
/// use nomen_domain::{Scope, UnresolvedPolicy};
///
/// let scopes = [
///     Scope::organization([("env", "prod")]),
///     Scope::namespace([("host", "{env}-db")]),
/// ];
/// let output = resolve("{host}-01", &scopes, UnresolvedPolicy::LeaveVerbatim).unwrap();
/// assert_eq!(output.value, "prod-db-01");
/// ```
///
/// # Errors
///
/// See [`VariableResolver::resolve`].
pub fn resolve(
    template: &str,
    scopes: &[Scope],
    policy: UnresolvedPolicy,
) -> Result<ResolvedOutput, ResolutionError> {
    VariableResolver::new(policy).resolve(template, scopes)
}
