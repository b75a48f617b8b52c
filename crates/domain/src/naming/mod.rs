//! Tenant records and naming schemas
//!
//! Organizations and namespaces carry the variable scopes; schema versions
//! carry the resource naming patterns those scopes are resolved into.

mod namespace;
mod organization;
mod schema;

pub use namespace::Namespace;
pub use organization::Organization;
pub use schema::{Resource, Schema, SchemaVersion};
