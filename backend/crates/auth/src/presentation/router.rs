//! Auth Router

use axum::{
    Router,
    routing::{get, post},
};

use crate::domain::repository::{SessionRepository, UserRepository};
use crate::presentation::handlers::{self, AuthAppState};

/// Public auth routes: registration, sign-in and sign-out
pub fn auth_router<R>(state: AuthAppState<R>) -> Router
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/create-user", post(handlers::create_user::<R>))
        .route(
            "/session",
            post(handlers::create_session::<R>).delete(handlers::delete_session::<R>),
        )
        .with_state(state)
}

/// Protected auth routes, to be nested under the authenticated prefix
pub fn auth_private_router() -> Router {
    Router::new().route("/whoami", get(handlers::whoami))
}
