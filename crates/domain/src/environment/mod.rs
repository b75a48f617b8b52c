//! Resolved environment domain types

mod variable;

pub use variable::{Environment, ResolvedVariable};
