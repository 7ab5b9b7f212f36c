//! Domain error model.

use thiserror::Error;

use crate::id::ProductId;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Why an input was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationFailure {
    /// Review author is empty (or whitespace only).
    EmptyAuthor,
    /// Review body is empty (or whitespace only).
    EmptyBody,
    /// Cart quantity is negative or above the per-line limit.
    InvalidQuantity(i64),
    /// Star rating outside 1..=5.
    InvalidRating(i64),
}

impl core::fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ValidationFailure::EmptyAuthor => f.write_str("author cannot be empty"),
            ValidationFailure::EmptyBody => f.write_str("review text cannot be empty"),
            ValidationFailure::InvalidQuantity(q) => write!(f, "invalid quantity: {q}"),
            ValidationFailure::InvalidRating(r) => write!(f, "rating must be 1..=5, got {r}"),
        }
    }
}

/// Domain-level error.
///
/// Every failure here is local and recoverable: the caller re-issues a
/// corrected action. Nothing in the storefront core is fatal.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The product id is not in the catalog.
    #[error("product {0} not found")]
    NotFound(ProductId),

    /// An input was rejected (draft field, rating, cart quantity).
    #[error("validation failed: {0}")]
    ValidationFailed(ValidationFailure),

    /// A domain invariant was violated (e.g. duplicate ids in the catalog).
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// The action does not fit the current state (e.g. no open detail view).
    #[error("conflict: {0}")]
    Conflict(String),
}

impl DomainError {
    pub fn not_found(id: ProductId) -> Self {
        Self::NotFound(id)
    }

    pub fn validation(failure: ValidationFailure) -> Self {
        Self::ValidationFailed(failure)
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }
}

impl From<ValidationFailure> for DomainError {
    fn from(value: ValidationFailure) -> Self {
        Self::ValidationFailed(value)
    }
}
