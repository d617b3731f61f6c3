//! Error conversions - From implementations for common error types
//!
//! Provides classification of driver errors into [`StoreFailure`] and the
//! HTTP rendering of [`AppError`].

#[cfg(feature = "axum")]
use super::app_error::AppError;
#[cfg(feature = "sqlx")]
use super::store::StoreFailure;

// ============================================================================
// SQLx conversions (feature-gated)
// ============================================================================

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for StoreFailure {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => StoreFailure::NotFound,
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_) => StoreFailure::Unavailable(err.to_string()),
            sqlx::Error::Database(db_err) => {
                if db_err.is_unique_violation() {
                    return StoreFailure::UniqueViolation(db_err.message().to_string());
                }
                if db_err.is_foreign_key_violation() {
                    return StoreFailure::ForeignKeyViolation(db_err.message().to_string());
                }
                // PostgreSQL specific error codes
                // https://www.postgresql.org/docs/current/errcodes-appendix.html
                match db_err.code().as_deref() {
                    // Class 53: insufficient resources
                    // Class 57: operator intervention
                    Some(
                        "53000" | "53100" | "53200" | "53300" | "57000" | "57014" | "57P01"
                        | "57P02" | "57P03",
                    ) => StoreFailure::Unavailable(err.to_string()),
                    _ => StoreFailure::Other(err.to_string()),
                }
            }
            _ => StoreFailure::Other(err.to_string()),
        }
    }
}

// ============================================================================
// Axum conversions (feature-gated)
// ============================================================================

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let body = serde_json::json!({ "error": self.message() });

        (status, Json(body)).into_response()
    }
}

/// Malformed request body
#[cfg(feature = "axum")]
impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        AppError::bad_request(rejection.body_text())
    }
}

/// Path segment that does not parse into the expected type
#[cfg(feature = "axum")]
impl From<axum::extract::rejection::PathRejection> for AppError {
    fn from(rejection: axum::extract::rejection::PathRejection) -> Self {
        AppError::unprocessable(rejection.body_text())
    }
}
