//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every variant is a deterministic failure: retrying the same operation with
/// the same input yields the same error. Callers match on the variant to pick
/// a user-facing message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A field value failed validation (empty name, non-positive quantity, ...).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A borrow record overlaps one already held by the item.
    #[error("conflict: {0}")]
    Conflict(String),

    /// An index fell outside `[0, size)`.
    #[error("index {index} is out of range for a list of {size} item(s)")]
    IndexOutOfRange { index: i64, size: usize },

    /// Attempt to mutate something in a terminal state.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// A requested record does not exist.
    #[error("not found: {0}")]
    NotFound(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn index_out_of_range(index: i64, size: usize) -> Self {
        Self::IndexOutOfRange { index, size }
    }

    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }
}
