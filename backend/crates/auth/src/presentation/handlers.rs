//! HTTP Handlers

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use kernel::extract::ApiJson;
use kernel::response::ApiResponse;
use platform::cookie::{extract_cookie, to_header_value};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::{RegisterUseCase, SessionManager, SignInInput, SignInUseCase};
use crate::domain::entity::user::UserDraft;
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{CredentialsRequest, UserResponse};
use crate::presentation::middleware::Authenticated;

/// Shared state for auth handlers and the authentication middleware
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

impl<R> AuthAppState<R>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    pub fn sessions(&self) -> SessionManager<R> {
        SessionManager::new(self.repo.clone(), self.config.clone())
    }
}

// ============================================================================
// Registration
// ============================================================================

/// POST /create-user
pub async fn create_user<R>(
    State(state): State<AuthAppState<R>>,
    ApiJson(req): ApiJson<CredentialsRequest>,
) -> AuthResult<ApiResponse<UserResponse>>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    let use_case = RegisterUseCase::new(state.repo.clone());

    let user = use_case
        .execute(UserDraft::new(req.email, req.password))
        .await?;

    Ok(ApiResponse::created(user.into()))
}

// ============================================================================
// Session
// ============================================================================

/// POST /session
///
/// Empty body on success; the session travels in the cookie.
pub async fn create_session<R>(
    State(state): State<AuthAppState<R>>,
    ApiJson(req): ApiJson<CredentialsRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    let use_case = SignInUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(SignInInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    let cookie = to_header_value(state.config.session_cookie().build_set_cookie(&output.session_token))
        .ok_or_else(|| AuthError::Internal("Session cookie is not a valid header".to_string()))?;

    Ok((
        [(header::SET_COOKIE, cookie)],
        ApiResponse::empty(StatusCode::OK),
    ))
}

/// DELETE /session
///
/// Always clears the cookie; a missing or stale session is not an error.
pub async fn delete_session<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    if let Some(token) = extract_cookie(&headers, &state.config.session_cookie_name) {
        state.sessions().invalidate(&token).await?;
    }

    let cookie = to_header_value(state.config.session_cookie().build_delete_cookie())
        .ok_or_else(|| AuthError::Internal("Session cookie is not a valid header".to_string()))?;

    Ok((
        [(header::SET_COOKIE, cookie)],
        ApiResponse::empty(StatusCode::OK),
    ))
}

// ============================================================================
// Current user (protected)
// ============================================================================

/// GET /private/whoami
pub async fn whoami(Authenticated { user, .. }: Authenticated) -> ApiResponse<UserResponse> {
    ApiResponse::ok(user.into())
}
