//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A scope tag is empty or malformed.
    #[error("invalid scope tag: {0:?}")]
    InvalidScopeTag(String),

    /// A variable name can never be referenced by a placeholder.
    #[error("invalid variable name: {0:?}")]
    InvalidVariableName(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
