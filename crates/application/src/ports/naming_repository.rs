//! Naming record repository port
//!
//! Defines the interface for fetching the organizations, namespaces and schema
//! versions a resolution request needs. Fetching is the caller's concern: the
//! resolution engine only ever sees the scopes built from these records.

use async_trait::async_trait;

use nomen_domain::{Namespace, Organization, Schema, SchemaVersion};

/// Errors that can occur during record store operations.
#[derive(Debug, thiserror::Error)]
pub enum NamingStoreError {
    /// The record does not exist.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Record kind, e.g. `organization`.
        kind: &'static str,
        /// Identifier that was looked up.
        id: String,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The record is published and can no longer be changed.
    #[error("Locked: {0}")]
    Locked(String),

    /// The record exists but is unusable.
    #[error("Invalid record: {0}")]
    Invalid(String),
}

/// Repository trait for naming records.
#[async_trait]
pub trait NamingRepository: Send + Sync {
    /// Loads an organization by id.
    ///
    /// # Errors
    /// Returns `NamingStoreError::NotFound` if the organization doesn't exist.
    async fn load_organization(&self, id: &str) -> Result<Organization, NamingStoreError>;

    /// Saves an organization, replacing any record with the same id.
    ///
    /// # Errors
    /// Returns an error if the record cannot be written.
    async fn save_organization(&self, organization: &Organization)
    -> Result<(), NamingStoreError>;

    /// Loads a namespace by id.
    ///
    /// # Errors
    /// Returns `NamingStoreError::NotFound` if the namespace doesn't exist.
    async fn load_namespace(&self, id: &str) -> Result<Namespace, NamingStoreError>;

    /// Saves a namespace, replacing any record with the same id.
    ///
    /// # Errors
    /// Returns an error if the record cannot be written.
    async fn save_namespace(&self, namespace: &Namespace) -> Result<(), NamingStoreError>;

    /// Loads a schema by id.
    ///
    /// # Errors
    /// Returns `NamingStoreError::NotFound` if the schema doesn't exist.
    async fn load_schema(&self, id: &str) -> Result<Schema, NamingStoreError>;

    /// Saves a schema, replacing any record with the same id.
    ///
    /// # Errors
    /// Returns an error if the record cannot be written.
    async fn save_schema(&self, schema: &Schema) -> Result<(), NamingStoreError>;

    /// Loads one version of a schema.
    ///
    /// # Errors
    /// Returns `NamingStoreError::NotFound` if the version doesn't exist.
    async fn load_schema_version(
        &self,
        schema_id: &str,
        version: u32,
    ) -> Result<SchemaVersion, NamingStoreError>;

    /// Saves a schema version.
    ///
    /// # Errors
    /// Returns `NamingStoreError::Locked` if the stored version is already
    /// published, or an error if the record cannot be written.
    async fn save_schema_version(&self, version: &SchemaVersion) -> Result<(), NamingStoreError>;

    /// Checks if an organization exists.
    async fn organization_exists(&self, id: &str) -> Result<bool, NamingStoreError> {
        match self.load_organization(id).await {
            Ok(_) => Ok(true),
            Err(NamingStoreError::NotFound { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }
}
