//! Nomen Application - Resolution engine and use cases
//!
//! This crate contains the variable-resolution engine that turns naming
//! templates into concrete names, plus the use cases that feed it with
//! records fetched through the ports.

pub mod error;
pub mod ports;
pub mod use_cases;
pub mod variable_resolver;

pub use error::{ApplicationError, ApplicationResult, ResolutionError};
