use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Forum category.
#[derive(Debug, Clone, Serialize)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub icon: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}
