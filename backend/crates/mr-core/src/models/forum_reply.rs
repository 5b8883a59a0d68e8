use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A reply inside a discussion thread.
#[derive(Debug, Clone)]
pub struct ForumReply {
    pub id: Uuid,
    pub post_id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
