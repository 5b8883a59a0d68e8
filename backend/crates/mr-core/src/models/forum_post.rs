use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A discussion thread opened by a user.
#[derive(Debug, Clone)]
pub struct ForumPost {
    pub id: Uuid,
    pub user_id: Uuid,
    pub category_id: Option<Uuid>,
    pub title: String,
    pub content: String,
    pub views: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
