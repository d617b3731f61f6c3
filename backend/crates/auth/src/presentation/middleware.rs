//! Auth Middleware
//!
//! Gate for protected routes. Per request:
//! token present -> token resolves -> user exists -> [`Authenticated`]
//! attached to the request. Any failed step short-circuits with 401 and the
//! wrapped handler never runs.

use axum::body::Body;
use axum::extract::{FromRequestParts, State};
use axum::http::Request;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;
use platform::cookie::extract_cookie;
use platform::request::RequestContext;

use crate::domain::entity::user::User;
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::error::AuthError;
use crate::presentation::handlers::AuthAppState;

/// Request context of an authenticated request
///
/// Only present on requests that passed [`authenticate_user`]; extracting it
/// anywhere else fails with 401.
#[derive(Debug, Clone)]
pub struct Authenticated {
    pub request: RequestContext,
    pub user: User,
}

impl<S> FromRequestParts<S> for Authenticated
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Authenticated>()
            .cloned()
            .ok_or(AuthError::NotAuthenticated)
    }
}

/// Middleware that requires a valid session
///
/// Use with `axum::middleware::from_fn_with_state`.
pub async fn authenticate_user<R>(
    State(state): State<AuthAppState<R>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AuthError>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    let token = extract_cookie(req.headers(), &state.config.session_cookie_name);

    let user_id = state.sessions().resolve(token.as_deref()).await?;

    let user = match state.repo.find_by_id(user_id).await {
        Ok(user) => user,
        Err(AuthError::UserNotFound) => {
            tracing::warn!(user_id = %user_id, "Session bound to a missing user");
            return Err(AuthError::NotAuthenticated);
        }
        Err(e) => return Err(e),
    };

    let request = RequestContext::from_parts(req.extensions(), req.headers());
    req.extensions_mut().insert(Authenticated { request, user });

    Ok(next.run(req).await)
}
