//! Works Router

use axum::{
    Router,
    routing::{get, post},
};

use crate::domain::repository::WorkRepository;
use crate::presentation::handlers::{self, WorksAppState};

/// Public read routes
pub fn works_router<R>(state: WorksAppState<R>) -> Router
where
    R: WorkRepository + Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/works/{pagination}/{page}", get(handlers::list_works::<R>))
        .route("/works/{pagination}/{page}/{name}", get(handlers::search_works::<R>))
        .route("/work/{id}", get(handlers::get_work::<R>))
        .route("/work-by-name/{name}", get(handlers::get_work_by_name::<R>))
        .with_state(state)
}

/// Write routes; the caller nests these behind the authentication middleware
pub fn works_private_router<R>(state: WorksAppState<R>) -> Router
where
    R: WorkRepository + Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/create-work", post(handlers::create_work::<R>))
        .route("/delete-work", post(handlers::delete_work::<R>))
        .with_state(state)
}
