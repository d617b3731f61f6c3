//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind, store::StoreFailure};
use kernel::validation::ValidationErrors;
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
///
/// `Display` is the client-facing message; store details carried by
/// `Unavailable`/`Internal` are only logged.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Registration input violates the user invariants
    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    /// Email already registered
    #[error("email already taken")]
    EmailTaken,

    /// User not found
    #[error("record not found")]
    UserNotFound,

    /// Unknown email or wrong password (deliberately not distinguished)
    #[error("incorrect email or password")]
    InvalidCredentials,

    /// Session token absent, malformed, expired or bound to a missing user
    #[error("not authenticated")]
    NotAuthenticated,

    /// Backing store unreachable or timed out
    #[error("storage unavailable")]
    Unavailable(String),

    /// Internal error
    #[error("internal server error")]
    Internal(String),
}

impl AuthError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation(_) | AuthError::EmailTaken | AuthError::UserNotFound => {
                ErrorKind::UnprocessableEntity
            }
            AuthError::InvalidCredentials | AuthError::NotAuthenticated => ErrorKind::Unauthorized,
            AuthError::Unavailable(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Unavailable(detail) => {
                tracing::error!(error = %detail, "Auth store unavailable");
            }
            AuthError::Internal(detail) => {
                tracing::error!(error = %detail, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<StoreFailure> for AuthError {
    fn from(failure: StoreFailure) -> Self {
        match failure {
            StoreFailure::Unavailable(detail) => AuthError::Unavailable(detail),
            StoreFailure::NotFound => AuthError::UserNotFound,
            StoreFailure::UniqueViolation(_) => AuthError::EmailTaken,
            other => AuthError::Internal(other.to_string()),
        }
    }
}
