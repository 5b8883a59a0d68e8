use mr_core::CourseProgress;

use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ProgressDto {
    pub course_id: i64,
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
}

impl From<CourseProgress> for ProgressDto {
    fn from(progress: CourseProgress) -> Self {
        Self {
            course_id: progress.course_id,
            completed: progress.completed,
            completed_at: progress.completed_at,
        }
    }
}
