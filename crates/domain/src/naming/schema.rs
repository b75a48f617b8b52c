//! Naming schemas and their versions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::id::generate_id;

/// A named set of resource patterns owned by an organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    /// Unique identifier.
    pub id: String,

    /// Owning organization.
    pub organization_id: String,

    /// Name, unique within the organization.
    pub name: String,
}

impl Schema {
    /// Creates a schema with a fresh identifier.
    #[must_use]
    pub fn new(organization_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: generate_id(),
            organization_id: organization_id.into(),
            name: name.into(),
        }
    }

    /// Returns the first version of this schema, with no resources.
    #[must_use]
    pub fn initial_version(&self) -> SchemaVersion {
        SchemaVersion::new(&self.id, 1)
    }
}

/// A resource kind and the pattern its names are built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    /// Resource name, e.g. `storage_account`.
    pub name: String,

    /// Naming template, e.g. `{env}-{region}-sa`.
    pub pattern: String,
}

/// One immutable revision of a schema's resource patterns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaVersion {
    /// Version number, starting at 1.
    pub id: u32,

    /// Schema this version belongs to.
    pub schema_id: String,

    /// Whether the version has been published for use.
    #[serde(default)]
    pub published: bool,

    /// Resources keyed by name.
    #[serde(default)]
    pub resources: BTreeMap<String, Resource>,
}

impl SchemaVersion {
    /// Creates an empty, unpublished version.
    #[must_use]
    pub fn new(schema_id: impl Into<String>, id: u32) -> Self {
        Self {
            id,
            schema_id: schema_id.into(),
            published: false,
            resources: BTreeMap::new(),
        }
    }

    /// Adds or replaces a resource pattern, returning the version for chaining.
    #[must_use]
    pub fn with_resource(mut self, name: impl Into<String>, pattern: impl Into<String>) -> Self {
        let name = name.into();
        self.resources.insert(
            name.clone(),
            Resource {
                name,
                pattern: pattern.into(),
            },
        );
        self
    }

    /// Marks the version as published, returning it for chaining.
    ///
    /// Stores refuse to overwrite a published version.
    #[must_use]
    pub const fn publish(mut self) -> Self {
        self.published = true;
        self
    }

    /// Looks up a resource by name.
    #[must_use]
    pub fn resource(&self, name: &str) -> Option<&Resource> {
        self.resources.get(name)
    }

    /// Creates the next version, copying this version's resources.
    #[must_use]
    pub fn next_version(&self) -> Self {
        Self {
            id: self.id + 1,
            schema_id: self.schema_id.clone(),
            published: false,
            resources: self.resources.clone(),
        }
    }
}
