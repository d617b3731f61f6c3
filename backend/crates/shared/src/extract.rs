//! Request extractors
//!
//! Thin wrappers over axum's `Json` and `Path` whose rejections render as
//! the uniform `{"error": ..}` envelope instead of axum's plain-text bodies.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::app_error::AppError;

/// JSON request body; any decode failure is a 400
#[derive(Debug, Clone, Copy, Default, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// Path parameters; a segment that does not parse is a 422
#[derive(Debug, Clone, Copy, Default, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct ApiPath<T>(pub T);
