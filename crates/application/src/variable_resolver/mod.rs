//! Variable resolution module
//!
//! Turns `{name}` naming templates into concrete strings using layered
//! variable scopes.
//!
//! # Usage
//!
//! ```
//! use nomen_application::variable_resolver::VariableResolver;
//! use nomen_domain::{Scope, UnresolvedPolicy};
//!
//! let scopes = [
//!     Scope::organization([("env", "prod"), ("region", "weu")]),
//!     Scope::namespace([("service", "{env}-payments")]),
//! ];
//!
//! let resolver = VariableResolver::new(UnresolvedPolicy::LeaveVerbatim);
//! let output = resolver.resolve("{service}-{region}", &scopes).unwrap();
//! assert_eq!(output.value, "prod-payments-weu");
//! ```

pub mod compositor;
pub mod engine;
pub mod graph;
pub mod parser;
pub mod pipeline;
pub mod substitution;

pub use compositor::{ComposedVariable, ScopeCompositor, WorkingSet, compose_layer};
pub use engine::{ScopeResolution, VariableResolver, resolve};
pub use graph::{CycleError, DependencyGraph};
pub use parser::{Placeholder, has_placeholders, parse_placeholders, placeholder_names};
pub use pipeline::{PipelineError, PipelineStage, ResolutionPipeline};
pub use substitution::substitute;
