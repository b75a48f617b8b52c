//! Nomen Domain - Core naming types
//!
//! This crate defines the domain model for the Nomen naming service:
//! variable scopes, resolved environments, tenant records and schemas.
//! All types here are pure Rust with no I/O dependencies.

pub mod environment;
pub mod error;
pub mod id;
pub mod naming;
pub mod resolution;
pub mod scope;
pub mod settings;

pub use environment::{Environment, ResolvedVariable};
pub use error::{DomainError, DomainResult};
pub use id::generate_id;
pub use naming::{Namespace, Organization, Resource, Schema, SchemaVersion};
pub use resolution::{ResolvedOutput, ResolvedResource, UnresolvedPolicy};
pub use scope::{Scope, VariableMap};
pub use settings::ServiceSettings;
