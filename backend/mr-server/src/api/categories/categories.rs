//! Category REST API handlers

use crate::{ApiResult, CategoryDto, CategoryListResponse};
use crate::state::AppState;

use mr_db::CategoryRepository;

use axum::{Json, extract::State};

/// GET /api/categories
pub async fn list_categories(
    State(state): State<AppState>,
) -> ApiResult<Json<CategoryListResponse>> {
    let repo = CategoryRepository::new(state.pool.clone());
    let categories = repo.find_all().await?;

    Ok(Json(CategoryListResponse {
        categories: categories.into_iter().map(CategoryDto::from).collect(),
    }))
}
