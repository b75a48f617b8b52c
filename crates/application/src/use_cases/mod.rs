//! Application use cases (record fetching plus resolution).

mod create_schema;
mod resolve_resource;
mod resolve_schema_resource;

pub use create_schema::{CreateSchema, CreateSchemaOutput};
pub use resolve_resource::{ResolveResource, ResolveResourceOutput};
pub use resolve_schema_resource::ResolveSchemaResource;
