//! Domain-specific error types and error handling.
//!
//! The taxonomy mirrors how failures surface to callers: validation failures
//! are never retried, conflicts are retryable, dependency failures carry the
//! upstream context.

use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug)]
pub enum DomainError {
    /// Malformed input: bad date range, negative id, empty required field,
    /// invalid enum variant. Maps to a 400-class response.
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// A referenced entity is absent. Maps to a 404-class response.
    #[error("{resource} not found (id: {id})")]
    NotFound { resource: &'static str, id: i64 },

    /// Overlap/double-booking, lost race, or duplicate unique key.
    /// Retryable by the caller; this layer does not auto-retry.
    #[error("Conflict: {message}")]
    Conflict { message: String },

    /// The acting client does not own the referenced entity.
    #[error("Forbidden: {message}")]
    Forbidden { message: String },

    /// Payment processor rejected or failed the charge.
    #[error("Payment failed for stay {stay_id}: {message}")]
    Payment { stay_id: i64, message: String },

    /// Storage transport failure, surfaced with the failing operation name.
    #[error("Database error during {operation}: {message}")]
    Database { operation: String, message: String },
}

impl DomainError {
    /// Validation error from any displayable message
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Not-found error for a named resource
    pub fn not_found(resource: &'static str, id: i64) -> Self {
        Self::NotFound { resource, id }
    }

    /// Conflict error from any displayable message
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Database error tagged with the failing operation
    pub fn database(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Database {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Whether a caller may retry the failed operation as-is
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }

    /// Stable error code for programmatic handling at the API boundary
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Conflict { .. } => "CONFLICT",
            Self::Forbidden { .. } => "FORBIDDEN",
            Self::Payment { .. } => "PAYMENT_FAILED",
            Self::Database { .. } => "DATABASE_ERROR",
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
