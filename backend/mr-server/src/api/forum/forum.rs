//! Forum REST API handlers.
//!
//! Reads serve guests and authenticated users alike; the viewer's identity
//! (when present) only changes per-viewer fields such as
//! `marked_helpful_by_user`. Writes require an identity.

use crate::api::forum::create_post_request::CreatePostRequest;
use crate::api::forum::create_reply_request::CreateReplyRequest;
use crate::api::forum::helpful_response::HelpfulResponse;
use crate::api::forum::post_detail_response::PostDetailResponse;
use crate::api::forum::post_list_response::PostListResponse;
use crate::state::AppState;
use crate::{ApiError, ApiResult, CurrentIdentity, PostDto, ReplyDto, RequireIdentity};

use mr_db::ForumRepository;

use std::panic::Location;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use error_location::ErrorLocation;
use serde::Deserialize;
use uuid::Uuid;

const PER_PAGE: i64 = 20;

#[derive(Debug, Deserialize)]
pub struct ListPostsQuery {
    /// Category name, or "all"/absent for every category.
    pub category: Option<String>,
    pub page: Option<i64>,
}

// =============================================================================
// Handlers
// =============================================================================

/// GET /api/forum/posts
pub async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<ListPostsQuery>,
) -> ApiResult<Json<PostListResponse>> {
    let page = query.page.unwrap_or(1).max(1);
    let category = query
        .category
        .as_deref()
        .filter(|c| !c.is_empty() && *c != "all");

    let repo = ForumRepository::new(state.pool.clone());
    let (posts, total) = repo.list_posts(category, page, PER_PAGE).await?;

    Ok(Json(PostListResponse {
        posts: posts.into_iter().map(PostDto::from).collect(),
        page,
        per_page: PER_PAGE,
        total,
    }))
}

/// GET /api/forum/posts/{id}
///
/// Bumps the view counter and returns the post with its replies.
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    identity: CurrentIdentity,
) -> ApiResult<Json<PostDetailResponse>> {
    let post_id = Uuid::parse_str(&id)?;
    let viewer = identity.0.map(|i| i.id);

    let repo = ForumRepository::new(state.pool.clone());
    let post = repo
        .find_post(post_id)
        .await?
        .ok_or_else(|| ApiError::NotFound {
            message: format!("Post {} not found", id),
            location: ErrorLocation::from(Location::caller()),
        })?;

    repo.bump_views(post_id).await?;
    let replies = repo.list_replies(post_id, viewer).await?;

    let mut post = PostDto::from(post);
    post.views += 1;

    Ok(Json(PostDetailResponse {
        post,
        replies: replies.into_iter().map(ReplyDto::from).collect(),
    }))
}

/// POST /api/forum/posts
pub async fn create_post(
    State(state): State<AppState>,
    RequireIdentity(identity): RequireIdentity,
    Json(request): Json<CreatePostRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    let title = request.title.trim();
    let content = request.content.trim();
    if title.is_empty() {
        return Err(validation("title", "Title is required"));
    }
    if content.is_empty() {
        return Err(validation("content", "Content is required"));
    }

    let repo = ForumRepository::new(state.pool.clone());
    let post = repo
        .create_post(identity.id, request.category_id, title, content)
        .await?;

    Ok(Json(serde_json::json!({ "id": post.id })))
}

/// POST /api/forum/posts/{id}/replies
pub async fn create_reply(
    State(state): State<AppState>,
    RequireIdentity(identity): RequireIdentity,
    Path(id): Path<String>,
    Json(request): Json<CreateReplyRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    let post_id = Uuid::parse_str(&id)?;
    let content = request.content.trim();
    if content.is_empty() {
        return Err(validation("content", "Content is required"));
    }

    let repo = ForumRepository::new(state.pool.clone());
    let reply = repo
        .create_reply(post_id, identity.id, content)
        .await?
        .ok_or_else(|| ApiError::NotFound {
            message: format!("Post {} not found", id),
            location: ErrorLocation::from(Location::caller()),
        })?;

    Ok(Json(serde_json::json!({ "id": reply.id })))
}

/// POST /api/forum/replies/{id}/helpful
///
/// Toggle: first call marks, second call unmarks.
pub async fn toggle_helpful(
    State(state): State<AppState>,
    RequireIdentity(identity): RequireIdentity,
    Path(id): Path<String>,
) -> ApiResult<Json<HelpfulResponse>> {
    let reply_id = Uuid::parse_str(&id)?;

    let repo = ForumRepository::new(state.pool.clone());
    let (marked, helpful_count) = repo
        .toggle_helpful(reply_id, identity.id)
        .await?
        .ok_or_else(|| ApiError::NotFound {
            message: format!("Reply {} not found", id),
            location: ErrorLocation::from(Location::caller()),
        })?;

    Ok(Json(HelpfulResponse {
        marked,
        helpful_count,
    }))
}

fn validation(field: &str, message: &str) -> ApiError {
    ApiError::Validation {
        message: message.to_string(),
        field: Some(field.to_string()),
        location: ErrorLocation::from(Location::caller()),
    }
}
