//! Success Response
//!
//! The single success path: serialize the payload with the given status, or
//! send an empty body when there is no payload. Errors go through
//! [`AppError`](crate::error::app_error::AppError) instead.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// 成功レスポンス
///
/// ## Examples
/// ```rust
/// use axum::http::StatusCode;
/// use kernel::response::ApiResponse;
///
/// let created = ApiResponse::created(vec!["a", "b"]);
/// assert_eq!(created.status(), StatusCode::CREATED);
///
/// let empty = ApiResponse::empty(StatusCode::OK);
/// assert_eq!(empty.status(), StatusCode::OK);
/// ```
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    status: StatusCode,
    payload: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(status: StatusCode, payload: Option<T>) -> Self {
        Self { status, payload }
    }

    /// 200 OK with a payload
    pub fn ok(payload: T) -> Self {
        Self::new(StatusCode::OK, Some(payload))
    }

    /// 201 Created with a payload
    pub fn created(payload: T) -> Self {
        Self::new(StatusCode::CREATED, Some(payload))
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl ApiResponse<()> {
    /// Status only, empty body
    pub fn empty(status: StatusCode) -> Self {
        Self::new(status, None)
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        match self.payload {
            Some(payload) => (self.status, Json(payload)).into_response(),
            None => self.status.into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn test_payload_is_serialized() {
        let response = ApiResponse::created(serde_json::json!({ "id": 1 })).into_response();
        assert_eq!(response.status(), StatusCode::CREATED);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["id"], 1);
    }

    #[tokio::test]
    async fn test_absent_payload_has_empty_body() {
        let response = ApiResponse::empty(StatusCode::OK).into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.is_empty());
    }
}
