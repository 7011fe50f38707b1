//! Service layer error types
//!
//! Provides a unified error type for all service operations.

use society_common::AppError;
use society_core::{DomainError, Role};
use std::fmt;

/// Service layer error type
#[derive(Debug)]
pub enum ServiceError {
    /// Domain rule violation or storage failure
    Domain(DomainError),

    /// Application error (credentials, hashing, configuration)
    App(AppError),

    /// No session, or the session expired
    Unauthorized,

    /// Signed in, but the role is too low
    Forbidden { required: Role },

    /// Request input failed validation
    Validation(String),

    /// A public section switched off in the site settings
    FeatureDisabled(&'static str),

    /// Internal error
    Internal(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domain(e) => write!(f, "{e}"),
            Self::App(e) => write!(f, "{e}"),
            Self::Unauthorized => f.write_str("Authentication required"),
            Self::Forbidden { required } => write!(f, "This action requires the {required} role"),
            Self::Validation(msg) => f.write_str(msg),
            Self::FeatureDisabled(section) => write!(f, "The {section} section is disabled"),
            Self::Internal(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Domain(e) => Some(e),
            Self::App(e) => Some(e),
            _ => None,
        }
    }
}

impl ServiceError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a forbidden error
    pub fn forbidden(required: Role) -> Self {
        Self::Forbidden { required }
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Domain(e) => e.status_code(),
            Self::App(e) => e.status_code(),
            Self::Unauthorized => 401,
            Self::Forbidden { .. } => 403,
            Self::Validation(_) => 400,
            Self::FeatureDisabled(_) => 404,
            Self::Internal(_) => 500,
        }
    }

    /// Get the error code for API responses
    pub fn error_code(&self) -> &str {
        match self {
            Self::Domain(e) => e.code(),
            Self::App(e) => e.error_code(),
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden { .. } => "FORBIDDEN",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::FeatureDisabled(_) => "FEATURE_DISABLED",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Whether this is a server-side failure whose details stay in the logs
    pub fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }
}

impl From<DomainError> for ServiceError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Unauthorized => Self::Unauthorized,
            other => Self::Domain(other),
        }
    }
}

impl From<AppError> for ServiceError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::Domain(e) => Self::from(e),
            other => Self::App(other),
        }
    }
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| {
                    e.message
                        .as_ref()
                        .map_or_else(|| format!("Invalid {field}"), ToString::to_string)
                })
            })
            .collect::<Vec<_>>()
            .join("; ");
        Self::Validation(message)
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Domain(e) => AppError::Domain(e),
            ServiceError::App(e) => e,
            ServiceError::Unauthorized => AppError::Domain(DomainError::Unauthorized),
            ServiceError::Forbidden { required } => {
                AppError::Domain(DomainError::Forbidden(required.to_string()))
            }
            ServiceError::Validation(msg) => AppError::Validation(msg),
            ServiceError::FeatureDisabled(section) => {
                AppError::Validation(format!("The {section} section is disabled"))
            }
            ServiceError::Internal(msg) => AppError::Internal(anyhow::anyhow!(msg)),
        }
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;
