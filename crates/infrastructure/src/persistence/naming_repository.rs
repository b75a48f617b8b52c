//! File-based naming record repository.
//!
//! Records are stored as stable JSON under a store root:
//! ```text
//! store/
//!   organizations/<id>.json
//!   namespaces/<id>.json
//!   schemas/<schema-id>/schema.json
//!   schemas/<schema-id>/versions/<n>.json
//! ```

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use nomen_application::ports::{NamingRepository, NamingStoreError};
use nomen_domain::{Namespace, Organization, Schema, SchemaVersion};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::serialization::{from_json_bytes, to_json_stable_bytes};

/// File-based naming record repository.
#[derive(Debug, Clone)]
pub struct FileNamingRepository {
    root: PathBuf,
}

impl FileNamingRepository {
    /// Creates a repository rooted at `root`. Nothing is created until a save.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the store root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn organization_path(&self, id: &str) -> PathBuf {
        self.root.join("organizations").join(format!("{id}.json"))
    }

    fn namespace_path(&self, id: &str) -> PathBuf {
        self.root.join("namespaces").join(format!("{id}.json"))
    }

    fn schema_path(&self, id: &str) -> PathBuf {
        self.root.join("schemas").join(id).join("schema.json")
    }

    fn schema_version_path(&self, schema_id: &str, version: u32) -> PathBuf {
        self.root
            .join("schemas")
            .join(schema_id)
            .join("versions")
            .join(format!("{version}.json"))
    }

    async fn read_record<T: DeserializeOwned>(
        path: &Path,
        kind: &'static str,
        id: &str,
    ) -> Result<T, NamingStoreError> {
        let content = match tokio::fs::read(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(NamingStoreError::NotFound {
                    kind,
                    id: id.to_string(),
                });
            }
            Err(e) => return Err(NamingStoreError::Io(e)),
        };

        debug!(path = %path.display(), kind, "loaded record");
        from_json_bytes(&content).map_err(|e| NamingStoreError::Serialization(e.to_string()))
    }

    async fn write_record<T: Serialize + Sync>(
        path: &Path,
        record: &T,
    ) -> Result<(), NamingStoreError> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let content = to_json_stable_bytes(record)
            .map_err(|e| NamingStoreError::Serialization(e.to_string()))?;

        // Readers never see a partial record.
        let temp = path.with_extension("json.tmp");
        tokio::fs::write(&temp, &content).await?;
        tokio::fs::rename(&temp, path).await?;

        debug!(path = %path.display(), "saved record");
        Ok(())
    }
}

/// Rejects identifiers that would escape their record directory.
fn check_id(kind: &'static str, id: &str) -> Result<(), NamingStoreError> {
    if id.is_empty() || id == "." || id == ".." || id.contains(['/', '\\']) {
        return Err(NamingStoreError::Invalid(format!(
            "{kind} id '{id}' is not a valid file name"
        )));
    }
    Ok(())
}

#[async_trait]
impl NamingRepository for FileNamingRepository {
    async fn load_organization(&self, id: &str) -> Result<Organization, NamingStoreError> {
        check_id("organization", id)?;
        Self::read_record(&self.organization_path(id), "organization", id).await
    }

    async fn save_organization(
        &self,
        organization: &Organization,
    ) -> Result<(), NamingStoreError> {
        check_id("organization", &organization.id)?;
        Self::write_record(&self.organization_path(&organization.id), organization).await
    }

    async fn load_namespace(&self, id: &str) -> Result<Namespace, NamingStoreError> {
        check_id("namespace", id)?;
        Self::read_record(&self.namespace_path(id), "namespace", id).await
    }

    async fn save_namespace(&self, namespace: &Namespace) -> Result<(), NamingStoreError> {
        check_id("namespace", &namespace.id)?;
        Self::write_record(&self.namespace_path(&namespace.id), namespace).await
    }

    async fn load_schema(&self, id: &str) -> Result<Schema, NamingStoreError> {
        check_id("schema", id)?;
        Self::read_record(&self.schema_path(id), "schema", id).await
    }

    async fn save_schema(&self, schema: &Schema) -> Result<(), NamingStoreError> {
        check_id("schema", &schema.id)?;
        Self::write_record(&self.schema_path(&schema.id), schema).await
    }

    async fn load_schema_version(
        &self,
        schema_id: &str,
        version: u32,
    ) -> Result<SchemaVersion, NamingStoreError> {
        check_id("schema", schema_id)?;
        let path = self.schema_version_path(schema_id, version);
        let record: SchemaVersion =
            Self::read_record(&path, "schema version", &format!("{schema_id}@{version}")).await?;

        if record.id != version || record.schema_id != schema_id {
            return Err(NamingStoreError::Invalid(format!(
                "{} holds {}@{}",
                path.display(),
                record.schema_id,
                record.id
            )));
        }
        Ok(record)
    }

    async fn save_schema_version(&self, version: &SchemaVersion) -> Result<(), NamingStoreError> {
        match self.load_schema_version(&version.schema_id, version.id).await {
            Ok(stored) if stored.published => {
                return Err(NamingStoreError::Locked(format!(
                    "schema '{}' version {} is published",
                    version.schema_id, version.id
                )));
            }
            Ok(_) | Err(NamingStoreError::NotFound { .. }) => {}
            Err(e) => return Err(e),
        }

        Self::write_record(
            &self.schema_version_path(&version.schema_id, version.id),
            version,
        )
        .await
    }
}
