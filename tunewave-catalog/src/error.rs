//! Error types for catalog operations
//!
//! This module defines the error taxonomy shared by every catalog
//! operation. Errors carry a stable kind plus a human-readable message
//! and deliberately no internal diagnostic detail.

use thiserror::Error;

use tunewave_rbac::PermissionDenied;

/// Catalog error types.
///
/// `NotFound` is returned both when an id does not exist and when it
/// exists outside the caller's scope; the two are indistinguishable to
/// the caller so out-of-scope resources do not leak their existence.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Missing or invalid credential or API key.
    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    /// Role not permitted for the operation, or scope check failed.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Entity does not exist or is outside the caller's scope.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// State-transition precondition violated (wrong source enterprise,
    /// transfer already pending, duplicate email, ...).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Status change not legal from the current state.
    #[error("Invalid state transition: {0}")]
    InvalidStateTransition(String),

    /// Malformed or missing required input.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Persistence collaborator failure.
    #[error("Repository error: {0}")]
    Repository(String),
}

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

impl CatalogError {
    /// Get HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            CatalogError::Unauthenticated(_) => 401,
            CatalogError::Forbidden(_) => 403,
            CatalogError::NotFound(_) => 404,
            CatalogError::Conflict(_) | CatalogError::InvalidStateTransition(_) => 409,
            CatalogError::Validation(_) => 400,
            CatalogError::Repository(_) => 500,
        }
    }

    /// Get error code for API responses.
    pub fn error_code(&self) -> &'static str {
        match self {
            CatalogError::Unauthenticated(_) => "UNAUTHENTICATED",
            CatalogError::Forbidden(_) => "FORBIDDEN",
            CatalogError::NotFound(_) => "NOT_FOUND",
            CatalogError::Conflict(_) => "CONFLICT",
            CatalogError::InvalidStateTransition(_) => "INVALID_STATE_TRANSITION",
            CatalogError::Validation(_) => "VALIDATION_ERROR",
            CatalogError::Repository(_) => "REPOSITORY_ERROR",
        }
    }

    /// Check if this error should be logged at error level.
    ///
    /// Client-caused failures are expected traffic and are logged at
    /// debug level by the service layer.
    pub fn is_server_error(&self) -> bool {
        matches!(self, CatalogError::Repository(_))
    }
}

impl From<PermissionDenied> for CatalogError {
    fn from(denied: PermissionDenied) -> Self {
        CatalogError::Forbidden(denied.to_string())
    }
}
