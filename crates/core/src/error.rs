//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Closed set of failures the booking service can raise. Storage details never
/// travel inside these variants; they are logged where they happen and
/// collapsed into [`DomainError::Database`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DomainError {
    /// The client sent a structurally invalid booking for creation.
    #[error("invalid booking")]
    InvalidBooking,

    /// The requested resource does not exist in the caller's scope.
    ///
    /// Not used for empty collections.
    #[error("not found")]
    NotFound,

    /// The storage layer failed.
    #[error("database error")]
    Database,

    /// The caller is missing, lacks privilege, or is scoped to another hotel.
    #[error("unauthorized")]
    Unauthorized,
}

impl DomainError {
    pub fn not_found() -> Self {
        Self::NotFound
    }
}
