//! Works Error Types

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind, store::StoreFailure};
use kernel::validation::ValidationErrors;
use thiserror::Error;

pub type WorkResult<T> = Result<T, WorkError>;

/// Works-specific error variants
#[derive(Debug, Error)]
pub enum WorkError {
    /// Draft, pagination window or ownership claim rejected
    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    /// No such work, or the work belongs to someone else
    #[error("record not found")]
    NotFound,

    #[error("storage unavailable")]
    Unavailable(String),

    #[error("internal server error")]
    Internal(String),
}

impl WorkError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            WorkError::Validation(_) | WorkError::NotFound => ErrorKind::UnprocessableEntity,
            WorkError::Unavailable(_) | WorkError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    fn log(&self) {
        match self {
            WorkError::Unavailable(detail) => {
                tracing::error!(error = %detail, "Works store unavailable");
            }
            WorkError::Internal(detail) => {
                tracing::error!(error = %detail, "Works internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Works request rejected");
            }
        }
    }
}

impl IntoResponse for WorkError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<StoreFailure> for WorkError {
    fn from(failure: StoreFailure) -> Self {
        match failure {
            StoreFailure::Unavailable(detail) => WorkError::Unavailable(detail),
            StoreFailure::NotFound => WorkError::NotFound,
            // works.creator_id is the only foreign key
            StoreFailure::ForeignKeyViolation(_) => {
                WorkError::Validation(ValidationErrors::single("creator", "does not exist"))
            }
            other => WorkError::Internal(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(WorkError::NotFound.to_app_error().status_code(), 422);
        assert_eq!(WorkError::Unavailable("x".into()).to_app_error().status_code(), 500);
    }

    #[test]
    fn test_foreign_key_violation_names_creator() {
        let err = WorkError::from(StoreFailure::ForeignKeyViolation("works_creator_id_fkey".into()));
        assert_eq!(err.to_string(), "creator: does not exist");
        assert_eq!(err.kind(), ErrorKind::UnprocessableEntity);
    }

    #[test]
    fn test_unavailable_is_not_swallowed() {
        let err = WorkError::from(StoreFailure::Unavailable("connection refused".into()));
        assert!(matches!(err, WorkError::Unavailable(_)));
        assert_eq!(err.to_string(), "storage unavailable");
    }
}
