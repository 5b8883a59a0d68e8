//! Progress REST API handlers. Both routes are identity-scoped.

use crate::api::progress::progress_list_response::ProgressListResponse;
use crate::api::progress::update_progress_request::UpdateProgressRequest;
use crate::state::AppState;
use crate::{ApiResult, ProgressDto, RequireIdentity};

use mr_db::ProgressRepository;

use axum::{Json, extract::State};

/// GET /api/progress
pub async fn list_progress(
    State(state): State<AppState>,
    RequireIdentity(identity): RequireIdentity,
) -> ApiResult<Json<ProgressListResponse>> {
    let repo = ProgressRepository::new(state.pool.clone());
    let progress = repo.list_for_user(identity.id).await?;

    Ok(Json(ProgressListResponse {
        progress: progress.into_iter().map(ProgressDto::from).collect(),
    }))
}

/// POST /api/progress
pub async fn update_progress(
    State(state): State<AppState>,
    RequireIdentity(identity): RequireIdentity,
    Json(request): Json<UpdateProgressRequest>,
) -> ApiResult<Json<ProgressDto>> {
    let repo = ProgressRepository::new(state.pool.clone());
    let progress = repo
        .upsert(identity.id, request.course_id, request.completed)
        .await?;

    Ok(Json(ProgressDto::from(progress)))
}
