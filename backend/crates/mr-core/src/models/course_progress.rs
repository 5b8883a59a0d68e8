use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Per-user completion state for one catalog course.
#[derive(Debug, Clone, Serialize)]
pub struct CourseProgress {
    #[serde(skip_serializing)]
    pub user_id: Uuid,
    pub course_id: i64,
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}
