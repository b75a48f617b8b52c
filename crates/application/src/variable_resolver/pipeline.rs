//! Resolution pipeline for one resource-name request.
//!
//! ```text
//! Start -> OrgResolved -> NamespaceResolved -> ResourceResolved
//!   \___________\_______________\__________________> Failed
//! ```
//!
//! Each transition resolves one layer on top of the environment produced by
//! the previous one. A failure leaves the environment as it was before the
//! failing step and moves the pipeline to [`PipelineStage::Failed`].

use std::fmt;

use nomen_domain::{Environment, Resource, ResolvedResource, Scope, UnresolvedPolicy};
use thiserror::Error;
use tracing::debug;

use super::engine::VariableResolver;
use crate::error::ResolutionError;

/// Position of a pipeline in its state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineStage {
    /// Nothing resolved yet.
    Start,
    /// Organization variables resolved.
    OrgResolved,
    /// Namespace variables resolved on top of the organization.
    NamespaceResolved,
    /// Resource pattern resolved. Terminal.
    ResourceResolved,
    /// A step failed. Terminal.
    Failed,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Start => "start",
            Self::OrgResolved => "organization resolved",
            Self::NamespaceResolved => "namespace resolved",
            Self::ResourceResolved => "resource resolved",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Errors produced by [`ResolutionPipeline`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// Resolution failed while leaving `stage`.
    #[error("resolution failed after stage '{stage}': {source}")]
    Failed {
        /// The stage the pipeline was in when the step failed.
        stage: PipelineStage,
        /// What went wrong.
        #[source]
        source: ResolutionError,
    },

    /// A step was requested from a stage that does not allow it.
    #[error("cannot {attempted} at stage '{stage}'")]
    OutOfOrder {
        /// The stage the pipeline was in.
        stage: PipelineStage,
        /// The step that was requested.
        attempted: &'static str,
    },
}

impl PipelineError {
    /// Returns the stage the pipeline was in when the error occurred.
    #[must_use]
    pub const fn stage(&self) -> PipelineStage {
        match self {
            Self::Failed { stage, .. } | Self::OutOfOrder { stage, .. } => *stage,
        }
    }

    /// Returns the underlying resolution error, if any.
    #[must_use]
    pub const fn resolution_error(&self) -> Option<&ResolutionError> {
        match self {
            Self::Failed { source, .. } => Some(source),
            Self::OutOfOrder { .. } => None,
        }
    }
}

/// Drives one organization → namespace → resource resolution.
#[derive(Debug, Clone)]
pub struct ResolutionPipeline {
    resolver: VariableResolver,
    stage: PipelineStage,
    environment: Environment,
    resolved_tags: Vec<String>,
}

impl ResolutionPipeline {
    /// Creates a pipeline at [`PipelineStage::Start`].
    #[must_use]
    pub fn new(policy: UnresolvedPolicy) -> Self {
        Self {
            resolver: VariableResolver::new(policy),
            stage: PipelineStage::Start,
            environment: Environment::new(),
            resolved_tags: Vec::new(),
        }
    }

    /// Creates a pipeline that starts from an already resolved organization
    /// environment, at [`PipelineStage::OrgResolved`].
    #[must_use]
    pub fn from_organization(policy: UnresolvedPolicy, organization: Environment) -> Self {
        Self {
            resolver: VariableResolver::new(policy),
            stage: PipelineStage::OrgResolved,
            environment: organization,
            resolved_tags: vec![Scope::ORGANIZATION.to_string()],
        }
    }

    /// Runs all three steps for one resource.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Failed`] naming the stage that failed. A
    /// repeated scope tag fails at [`PipelineStage::Start`] before either
    /// scope is resolved.
    pub fn run(
        policy: UnresolvedPolicy,
        organization: &Scope,
        namespace: &Scope,
        resource: &Resource,
    ) -> Result<ResolvedResource, PipelineError> {
        let mut pipeline = Self::new(policy);
        if namespace.tag == organization.tag {
            return Err(pipeline.fail(ResolutionError::DuplicateScope(namespace.tag.clone())));
        }
        pipeline.resolve_organization(organization)?;
        pipeline.resolve_namespace(namespace)?;
        pipeline.resolve_resource(resource)
    }

    /// Returns the current stage.
    #[must_use]
    pub const fn stage(&self) -> PipelineStage {
        self.stage
    }

    /// Returns the environment resolved so far.
    #[must_use]
    pub const fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Resolves the organization scope.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::OutOfOrder`] unless at
    /// [`PipelineStage::Start`], or [`PipelineError::Failed`] if the scope
    /// cannot be resolved.
    pub fn resolve_organization(&mut self, scope: &Scope) -> Result<&Environment, PipelineError> {
        self.resolve_layer(
            scope,
            PipelineStage::Start,
            PipelineStage::OrgResolved,
            "resolve the organization scope",
        )
    }

    /// Resolves the namespace scope on top of the organization environment.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::OutOfOrder`] unless at
    /// [`PipelineStage::OrgResolved`], or [`PipelineError::Failed`] if the
    /// scope cannot be resolved.
    pub fn resolve_namespace(&mut self, scope: &Scope) -> Result<&Environment, PipelineError> {
        self.resolve_layer(
            scope,
            PipelineStage::OrgResolved,
            PipelineStage::NamespaceResolved,
            "resolve the namespace scope",
        )
    }

    /// Resolves a resource pattern against the full environment.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::OutOfOrder`] unless at
    /// [`PipelineStage::NamespaceResolved`], or [`PipelineError::Failed`]
    /// if the pattern cannot be resolved under the policy.
    pub fn resolve_resource(
        &mut self,
        resource: &Resource,
    ) -> Result<ResolvedResource, PipelineError> {
        self.expect_stage(PipelineStage::NamespaceResolved, "resolve a resource")?;

        let output = self
            .resolver
            .substitute(&resource.pattern, &self.environment)
            .map_err(|source| self.fail(source))?;

        self.stage = PipelineStage::ResourceResolved;
        debug!(resource = %resource.name, complete = output.is_complete(), "Resource resolved");

        Ok(ResolvedResource {
            resource_name: resource.name.clone(),
            pattern: resource.pattern.clone(),
            value: output.value,
            unresolved: output.unresolved,
        })
    }

    fn resolve_layer(
        &mut self,
        scope: &Scope,
        expected: PipelineStage,
        next: PipelineStage,
        attempted: &'static str,
    ) -> Result<&Environment, PipelineError> {
        self.expect_stage(expected, attempted)?;

        if self.resolved_tags.contains(&scope.tag) {
            return Err(self.fail(ResolutionError::DuplicateScope(scope.tag.clone())));
        }

        let resolution = self
            .resolver
            .resolve_scope(&self.environment, scope)
            .map_err(|source| self.fail(source))?;

        debug!(
            stage = %next,
            scope = %scope.tag,
            variables = resolution.order.len(),
            "Pipeline advanced"
        );

        self.environment = resolution.environment;
        self.resolved_tags.push(scope.tag.clone());
        self.stage = next;
        Ok(&self.environment)
    }

    fn expect_stage(
        &self,
        expected: PipelineStage,
        attempted: &'static str,
    ) -> Result<(), PipelineError> {
        if self.stage == expected {
            Ok(())
        } else {
            Err(PipelineError::OutOfOrder {
                stage: self.stage,
                attempted,
            })
        }
    }

    fn fail(&mut self, source: ResolutionError) -> PipelineError {
        let stage = self.stage;
        self.stage = PipelineStage::Failed;
        PipelineError::Failed { stage, source }
    }
}
