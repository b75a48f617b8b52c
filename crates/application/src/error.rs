//! Application error types

use thiserror::Error;
use nomen_domain::DomainError;

use crate::variable_resolver::PipelineError;

/// Errors raised by the resolution engine.
///
/// None of these is retried: each one describes input that resolves the same
/// way every time.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    /// Variables of a scope reference each other in a loop.
    #[error("cyclic reference in scope '{scope}': {}", members.join(" -> "))]
    CyclicReference {
        /// Tag of the scope being resolved.
        scope: String,
        /// Names on the cycle, sorted.
        members: Vec<String>,
    },

    /// Placeholders had no value under the `error` policy.
    #[error("unresolved placeholders: {}", names.join(", "))]
    UnresolvedPlaceholder {
        /// Every unmatched name, sorted and deduplicated.
        names: Vec<String>,
    },

    /// The same scope tag was passed more than once.
    #[error("duplicate scope: {0}")]
    DuplicateScope(String),
}

/// Application-level errors.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// A domain validation error occurred.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// Template or scope resolution failed.
    #[error("resolution error: {0}")]
    Resolution(#[from] ResolutionError),

    /// The resolution pipeline failed at some stage.
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    /// A storage operation failed.
    #[error("storage error: {0}")]
    Storage(String),

    /// The requested record was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// The record is published and can no longer be changed.
    #[error("locked: {0}")]
    Locked(String),
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;

impl From<crate::ports::NamingStoreError> for ApplicationError {
    fn from(error: crate::ports::NamingStoreError) -> Self {
        match error {
            crate::ports::NamingStoreError::NotFound { kind, id } => {
                Self::NotFound(format!("{kind} '{id}'"))
            }
            crate::ports::NamingStoreError::Locked(message) => Self::Locked(message),
            other => Self::Storage(other.to_string()),
        }
    }
}
