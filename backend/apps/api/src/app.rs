//! Router assembly

use auth::domain::repository::{SessionRepository, UserRepository};
use auth::{AuthAppState, auth_private_router, auth_router, authenticate_user};
use axum::{Router, middleware, routing::get};
use kernel::error::app_error::AppError;
use kernel::response::ApiResponse;
use platform::request::{assign_request_id, trace_layer};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use works::domain::repository::WorkRepository;
use works::{WorksAppState, works_private_router, works_router};

/// One line of the `/api/help` listing
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Endpoint {
    pub method: &'static str,
    pub path: &'static str,
    pub description: &'static str,
}

pub const ENDPOINTS: &[Endpoint] = &[
    Endpoint {
        method: "GET",
        path: "/api/help",
        description: "list available endpoints",
    },
    Endpoint {
        method: "GET",
        path: "/works/{pagination}/{page}",
        description: "page through works",
    },
    Endpoint {
        method: "GET",
        path: "/works/{pagination}/{page}/{name}",
        description: "page through works whose name contains {name}",
    },
    Endpoint {
        method: "GET",
        path: "/work/{id}",
        description: "get a work by id",
    },
    Endpoint {
        method: "GET",
        path: "/work-by-name/{name}",
        description: "get a work by exact name",
    },
    Endpoint {
        method: "POST",
        path: "/create-user",
        description: "register with {email, password}",
    },
    Endpoint {
        method: "POST",
        path: "/session",
        description: "sign in with {email, password}",
    },
    Endpoint {
        method: "DELETE",
        path: "/session",
        description: "sign out",
    },
    Endpoint {
        method: "GET",
        path: "/private/whoami",
        description: "current user",
    },
    Endpoint {
        method: "POST",
        path: "/private/create-work",
        description: "create a work with {creator, name, description, links}",
    },
    Endpoint {
        method: "POST",
        path: "/private/delete-work",
        description: "delete an owned work with {creator, work}",
    },
];

async fn help() -> ApiResponse<&'static [Endpoint]> {
    ApiResponse::ok(ENDPOINTS)
}

async fn fallback() -> AppError {
    AppError::not_found("not found")
}

/// Build the full application router
///
/// Layer order, outermost first: request id, request logging, CORS, then
/// authentication on `/private` routes only.
pub fn build_router<A, W>(
    auth_state: AuthAppState<A>,
    works_state: WorksAppState<W>,
    cors: CorsLayer,
) -> Router
where
    A: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
    W: WorkRepository + Clone + Send + Sync + 'static,
{
    let private = Router::new()
        .merge(auth_private_router())
        .merge(works_private_router(works_state.clone()))
        .route_layer(middleware::from_fn_with_state(
            auth_state.clone(),
            authenticate_user::<A>,
        ));

    Router::new()
        .route("/api/help", get(help))
        .merge(auth_router(auth_state))
        .merge(works_router(works_state))
        .nest("/private", private)
        .fallback(fallback)
        .layer(cors)
        .layer(trace_layer())
        .layer(middleware::from_fn(assign_request_id))
}
