//! Resolve resource use case
//!
//! Resolves one resource of a namespace's schema version through the
//! organization → namespace → resource pipeline.

use nomen_domain::{Namespace, ResolvedResource, UnresolvedPolicy};
use tracing::{info, instrument};

use crate::error::{ApplicationError, ApplicationResult};
use crate::ports::NamingRepository;
use crate::variable_resolver::ResolutionPipeline;

/// Output of a resource resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveResourceOutput {
    /// The resolved resource name.
    pub resource: ResolvedResource,

    /// The namespace the resource was resolved in.
    pub namespace: Namespace,
}

/// Resolves a resource name for a namespace.
pub struct ResolveResource<R> {
    repository: R,
    policy: UnresolvedPolicy,
}

impl<R: NamingRepository> ResolveResource<R> {
    /// Creates a new `ResolveResource` use case.
    pub const fn new(repository: R, policy: UnresolvedPolicy) -> Self {
        Self { repository, policy }
    }

    /// Executes the use case.
    ///
    /// # Arguments
    /// * `namespace_id` - Namespace whose variables and schema version to use
    /// * `resource_name` - Resource name within that schema version
    ///
    /// # Errors
    /// Returns `ApplicationError::NotFound` if the namespace, its organization,
    /// its schema version or the resource does not exist, and
    /// `ApplicationError::Pipeline` if resolution fails.
    #[instrument(skip(self))]
    pub async fn execute(
        &self,
        namespace_id: &str,
        resource_name: &str,
    ) -> ApplicationResult<ResolveResourceOutput> {
        let namespace = self.repository.load_namespace(namespace_id).await?;
        let organization = self
            .repository
            .load_organization(&namespace.organization_id)
            .await?;
        let schema_version = self
            .repository
            .load_schema_version(&namespace.schema_id, namespace.schema_version)
            .await?;

        let resource = schema_version.resource(resource_name).ok_or_else(|| {
            ApplicationError::NotFound(format!(
                "resource '{resource_name}' in schema '{}' version {}",
                namespace.schema_id, namespace.schema_version
            ))
        })?;

        let resolved = ResolutionPipeline::run(
            self.policy,
            &organization.scope(),
            &namespace.scope(),
            resource,
        )?;

        info!(value = %resolved.value, "Resource name resolved");

        Ok(ResolveResourceOutput {
            resource: resolved,
            namespace,
        })
    }
}
