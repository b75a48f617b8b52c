//! Resolve schema resource use case
//!
//! Resolves a resource of a specific schema version using only variables
//! supplied with the request, without any organization or namespace scope.

use std::slice;

use nomen_domain::{ResolvedResource, Scope, UnresolvedPolicy, VariableMap};
use tracing::{info, instrument};

use crate::error::{ApplicationError, ApplicationResult};
use crate::ports::NamingRepository;
use crate::variable_resolver::VariableResolver;

/// Resolves a schema resource against request variables.
pub struct ResolveSchemaResource<R> {
    repository: R,
    resolver: VariableResolver,
}

impl<R: NamingRepository> ResolveSchemaResource<R> {
    /// Creates a new `ResolveSchemaResource` use case.
    pub const fn new(repository: R, policy: UnresolvedPolicy) -> Self {
        Self {
            repository,
            resolver: VariableResolver::new(policy),
        }
    }

    /// Executes the use case.
    ///
    /// # Arguments
    /// * `schema_id` - Schema to read the resource pattern from
    /// * `version` - Schema version number
    /// * `resource_name` - Resource within that version
    /// * `variables` - Request-scope variable templates
    ///
    /// # Errors
    /// Returns `ApplicationError::NotFound` if the version or resource does not
    /// exist, `ApplicationError::Domain` for unusable variable names and
    /// `ApplicationError::Resolution` if resolution fails.
    #[instrument(skip(self, variables))]
    pub async fn execute(
        &self,
        schema_id: &str,
        version: u32,
        resource_name: &str,
        variables: VariableMap,
    ) -> ApplicationResult<ResolvedResource> {
        let schema_version = self
            .repository
            .load_schema_version(schema_id, version)
            .await?;

        let resource = schema_version.resource(resource_name).ok_or_else(|| {
            ApplicationError::NotFound(format!(
                "resource '{resource_name}' in schema '{schema_id}' version {version}"
            ))
        })?;

        let scope = Scope::request(variables);
        scope.validate()?;

        let environment = self.resolver.resolve_scopes(slice::from_ref(&scope))?;
        let output = self.resolver.substitute(&resource.pattern, &environment)?;

        info!(value = %output.value, "Schema resource resolved");

        Ok(ResolvedResource {
            resource_name: resource.name.clone(),
            pattern: resource.pattern.clone(),
            value: output.value,
            unresolved: output.unresolved,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::error::ResolutionError;
    use crate::use_cases::resolve_resource::tests::MockRepository;
    use nomen_domain::{DomainError, SchemaVersion};

    async fn use_case(policy: UnresolvedPolicy) -> ResolveSchemaResource<MockRepository> {
        let repo = MockRepository::default();
        let version = SchemaVersion::new("schema-1", 3).with_resource("vm", "{env}-{app}-vm");
        repo.save_schema_version(&version).await.expect("save version");
        ResolveSchemaResource::new(repo, policy)
    }

    fn vars(pairs: &[(&str, &str)]) -> VariableMap {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[tokio::test]
    async fn test_resolves_with_request_variables() {
        let use_case = use_case(UnresolvedPolicy::LeaveVerbatim).await;
        let resolved = use_case
            .execute("schema-1", 3, "vm", vars(&[("env", "dev"), ("app", "{env}web")]))
            .await
            .expect("resolves");

        assert_eq!(resolved.value, "dev-devweb-vm");
        assert_eq!(resolved.resource_name, "vm");
        assert!(resolved.unresolved.is_empty());
    }

    #[tokio::test]
    async fn test_missing_request_variable_policies() {
        let lenient = use_case(UnresolvedPolicy::LeaveVerbatim).await;
        let resolved = lenient
            .execute("schema-1", 3, "vm", vars(&[("env", "dev")]))
            .await
            .expect("verbatim");
        assert_eq!(resolved.value, "dev-{app}-vm");

        let strict = use_case(UnresolvedPolicy::Error).await;
        let result = strict
            .execute("schema-1", 3, "vm", vars(&[("env", "dev")]))
            .await;
        assert!(matches!(
            result,
            Err(ApplicationError::Resolution(ResolutionError::UnresolvedPlaceholder { names }))
                if names == ["app"]
        ));
    }

    #[tokio::test]
    async fn test_unknown_version() {
        let use_case = use_case(UnresolvedPolicy::LeaveVerbatim).await;
        let result = use_case.execute("schema-1", 4, "vm", VariableMap::new()).await;
        assert!(matches!(result, Err(ApplicationError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_rejects_unreferenceable_variable_name() {
        let use_case = use_case(UnresolvedPolicy::LeaveVerbatim).await;
        let result = use_case
            .execute("schema-1", 3, "vm", vars(&[("bad}", "x")]))
            .await;
        assert!(matches!(
            result,
            Err(ApplicationError::Domain(DomainError::InvalidVariableName(_)))
        ));
    }
}
