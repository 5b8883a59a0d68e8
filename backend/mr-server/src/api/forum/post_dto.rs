use mr_core::PostSummary;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct PostDto {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub views: i64,
    pub username: String,
    pub profile_picture: Option<String>,
    pub category_name: Option<String>,
    pub reply_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PostSummary> for PostDto {
    fn from(summary: PostSummary) -> Self {
        Self {
            id: summary.post.id,
            title: summary.post.title,
            content: summary.post.content,
            views: summary.post.views,
            username: summary.username,
            profile_picture: summary.profile_picture,
            category_name: summary.category_name,
            reply_count: summary.reply_count,
            created_at: summary.post.created_at,
            updated_at: summary.post.updated_at,
        }
    }
}
