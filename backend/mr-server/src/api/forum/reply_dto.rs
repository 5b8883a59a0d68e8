use mr_core::ReplyView;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct ReplyDto {
    pub id: Uuid,
    pub content: String,
    pub username: String,
    pub profile_picture: Option<String>,
    pub helpful_count: i64,
    /// Always false for guest viewers.
    pub marked_helpful_by_user: bool,
    pub created_at: DateTime<Utc>,
}

impl From<ReplyView> for ReplyDto {
    fn from(view: ReplyView) -> Self {
        Self {
            id: view.reply.id,
            content: view.reply.content,
            username: view.username,
            profile_picture: view.profile_picture,
            helpful_count: view.helpful_count,
            marked_helpful_by_user: view.marked_helpful_by_user,
            created_at: view.reply.created_at,
        }
    }
}
