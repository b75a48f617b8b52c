//! Create schema use case
//!
//! Registers a naming schema for an organization together with its first,
//! empty, unpublished version.

use nomen_domain::{Schema, SchemaVersion};
use tracing::{info, instrument};

use crate::error::{ApplicationError, ApplicationResult};
use crate::ports::NamingRepository;

/// Output of schema creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateSchemaOutput {
    /// The new schema.
    pub schema: Schema,

    /// Its initial version.
    pub version: SchemaVersion,
}

/// Creates a schema and its initial version.
pub struct CreateSchema<R> {
    repository: R,
}

impl<R: NamingRepository> CreateSchema<R> {
    /// Creates a new `CreateSchema` use case.
    pub const fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Executes the use case.
    ///
    /// # Errors
    /// Returns `ApplicationError::NotFound` if the organization does not
    /// exist, or a storage error if either record cannot be written.
    #[instrument(skip(self))]
    pub async fn execute(
        &self,
        organization_id: &str,
        name: &str,
    ) -> ApplicationResult<CreateSchemaOutput> {
        if !self.repository.organization_exists(organization_id).await? {
            return Err(ApplicationError::NotFound(format!(
                "organization '{organization_id}'"
            )));
        }

        let schema = Schema::new(organization_id, name);
        let version = schema.initial_version();

        self.repository.save_schema(&schema).await?;
        self.repository.save_schema_version(&version).await?;

        info!(schema_id = %schema.id, "Schema created");
        Ok(CreateSchemaOutput { schema, version })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::use_cases::resolve_resource::tests::MockRepository;
    use nomen_domain::Organization;

    #[tokio::test]
    async fn test_creates_schema_with_initial_version() {
        let repo = MockRepository::default();
        let org = Organization::new("acme");
        repo.save_organization(&org).await.expect("save org");

        let output = CreateSchema::new(repo)
            .execute(&org.id, "azure")
            .await
            .expect("created");

        assert_eq!(output.schema.organization_id, org.id);
        assert_eq!(output.schema.name, "azure");
        assert_eq!(output.version.id, 1);
        assert_eq!(output.version.schema_id, output.schema.id);
        assert!(!output.version.published);
    }

    #[tokio::test]
    async fn test_records_are_stored() {
        let repo = MockRepository::default();
        let org = Organization::new("acme");
        repo.save_organization(&org).await.expect("save org");
        let use_case = CreateSchema::new(repo);

        let output = use_case.execute(&org.id, "azure").await.expect("created");

        let stored = use_case
            .repository
            .load_schema(&output.schema.id)
            .await
            .expect("schema stored");
        assert_eq!(stored, output.schema);
        let version = use_case
            .repository
            .load_schema_version(&output.schema.id, 1)
            .await
            .expect("version stored");
        assert_eq!(version, output.version);
    }

    #[tokio::test]
    async fn test_unknown_organization() {
        let result = CreateSchema::new(MockRepository::default())
            .execute("missing", "azure")
            .await;
        assert!(matches!(result, Err(ApplicationError::NotFound(msg)) if msg.contains("missing")));
    }

    #[tokio::test]
    async fn test_published_version_is_locked() {
        let repo = MockRepository::default();
        let org = Organization::new("acme");
        repo.save_organization(&org).await.expect("save org");
        let use_case = CreateSchema::new(repo);
        let output = use_case.execute(&org.id, "azure").await.expect("created");

        let published = output.version.with_resource("db", "{env}-db").publish();
        use_case
            .repository
            .save_schema_version(&published)
            .await
            .expect("publish");

        let err = use_case
            .repository
            .save_schema_version(&published.with_resource("vm", "{env}-vm"))
            .await
            .expect_err("locked");
        assert!(matches!(
            ApplicationError::from(err),
            ApplicationError::Locked(_)
        ));
    }
}
