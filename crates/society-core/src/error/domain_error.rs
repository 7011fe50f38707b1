//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::EntityKind;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("{kind} not found: {id}")]
    RecordNotFound { kind: EntityKind, id: String },

    #[error("Photo not found: {0}")]
    PhotoNotFound(String),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("{0}")]
    ValidationError(String),

    #[error("{0}")]
    UnsupportedFileType(String),

    #[error("{0}")]
    FileTooLarge(String),

    // =========================================================================
    // State Errors
    // =========================================================================
    #[error("{0}")]
    InvalidState(String),

    // =========================================================================
    // Authentication / Authorization Errors
    // =========================================================================
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Authentication required")]
    Unauthorized,

    #[error("Insufficient role: {0} required")]
    Forbidden(String),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Shorthand for a missing record of the given kind
    pub fn not_found(kind: EntityKind, id: impl Into<String>) -> Self {
        Self::RecordNotFound {
            kind,
            id: id.into(),
        }
    }

    /// Shorthand for a validation failure
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }

    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::RecordNotFound { .. } | Self::PhotoNotFound(_) => "NOT_FOUND",
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::UnsupportedFileType(_) => "UNSUPPORTED_FILE_TYPE",
            Self::FileTooLarge(_) => "FILE_TOO_LARGE",
            Self::InvalidState(_) => "INVALID_STATE",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::StorageUnavailable(_) => "STORAGE_UNAVAILABLE",
            Self::CacheError(_) => "CACHE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::RecordNotFound { .. } | Self::PhotoNotFound(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_) | Self::UnsupportedFileType(_) | Self::FileTooLarge(_)
        )
    }

    /// Check if this is an invalid lifecycle transition
    pub fn is_invalid_state(&self) -> bool {
        matches!(self, Self::InvalidState(_))
    }

    /// Check if this is an authentication error
    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::InvalidCredentials | Self::Unauthorized)
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::Forbidden(_))
    }

    /// HTTP status code this error maps to
    pub fn status_code(&self) -> u16 {
        if self.is_not_found() {
            404
        } else if self.is_validation() || self.is_invalid_state() {
            400
        } else if self.is_authentication() {
            401
        } else if self.is_authorization() {
            403
        } else {
            500
        }
    }
}
