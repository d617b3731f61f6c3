//! HTTP Handlers

use std::sync::Arc;

use auth::Authenticated;
use axum::extract::State;
use axum::http::StatusCode;
use kernel::extract::{ApiJson, ApiPath};
use kernel::id::{UserId, WorkId};
use kernel::response::ApiResponse;

use crate::application::{BrowseWorksUseCase, CreateWorkUseCase, DeleteWorkUseCase};
use crate::domain::repository::WorkRepository;
use crate::error::WorkResult;
use crate::presentation::dto::{CreateWorkRequest, DeleteWorkRequest, WorkResponse, to_responses};

/// Shared state for works handlers
#[derive(Clone)]
pub struct WorksAppState<R>
where
    R: WorkRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
}

impl<R> WorksAppState<R>
where
    R: WorkRepository + Clone + Send + Sync + 'static,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

// ============================================================================
// Public reads
// ============================================================================

/// GET /works/{pagination}/{page}
pub async fn list_works<R>(
    State(state): State<WorksAppState<R>>,
    ApiPath((page_size, page_index)): ApiPath<(i64, i64)>,
) -> WorkResult<ApiResponse<Vec<WorkResponse>>>
where
    R: WorkRepository + Clone + Send + Sync + 'static,
{
    let works = BrowseWorksUseCase::new(state.repo.clone())
        .list(page_size, page_index)
        .await?;

    Ok(ApiResponse::ok(to_responses(works)))
}

/// GET /works/{pagination}/{page}/{name}
pub async fn search_works<R>(
    State(state): State<WorksAppState<R>>,
    ApiPath((page_size, page_index, name)): ApiPath<(i64, i64, String)>,
) -> WorkResult<ApiResponse<Vec<WorkResponse>>>
where
    R: WorkRepository + Clone + Send + Sync + 'static,
{
    let works = BrowseWorksUseCase::new(state.repo.clone())
        .search(&name, page_size, page_index)
        .await?;

    Ok(ApiResponse::ok(to_responses(works)))
}

/// GET /work/{id}
pub async fn get_work<R>(
    State(state): State<WorksAppState<R>>,
    ApiPath(id): ApiPath<i64>,
) -> WorkResult<ApiResponse<WorkResponse>>
where
    R: WorkRepository + Clone + Send + Sync + 'static,
{
    let work = BrowseWorksUseCase::new(state.repo.clone())
        .get(WorkId::new(id))
        .await?;

    Ok(ApiResponse::ok(work.into()))
}

/// GET /work-by-name/{name}
pub async fn get_work_by_name<R>(
    State(state): State<WorksAppState<R>>,
    ApiPath(name): ApiPath<String>,
) -> WorkResult<ApiResponse<WorkResponse>>
where
    R: WorkRepository + Clone + Send + Sync + 'static,
{
    let work = BrowseWorksUseCase::new(state.repo.clone())
        .get_by_name(&name)
        .await?;

    Ok(ApiResponse::ok(work.into()))
}

// ============================================================================
// Protected writes
// ============================================================================

/// POST /private/create-work
pub async fn create_work<R>(
    State(state): State<WorksAppState<R>>,
    auth: Authenticated,
    ApiJson(req): ApiJson<CreateWorkRequest>,
) -> WorkResult<ApiResponse<WorkResponse>>
where
    R: WorkRepository + Clone + Send + Sync + 'static,
{
    let work = CreateWorkUseCase::new(state.repo.clone())
        .execute(auth.user.id, req.into())
        .await?;

    Ok(ApiResponse::created(work.into()))
}

/// POST /private/delete-work
pub async fn delete_work<R>(
    State(state): State<WorksAppState<R>>,
    auth: Authenticated,
    ApiJson(req): ApiJson<DeleteWorkRequest>,
) -> WorkResult<ApiResponse<()>>
where
    R: WorkRepository + Clone + Send + Sync + 'static,
{
    DeleteWorkUseCase::new(state.repo.clone())
        .execute(auth.user.id, UserId::new(req.creator), WorkId::new(req.work))
        .await?;

    Ok(ApiResponse::empty(StatusCode::OK))
}
