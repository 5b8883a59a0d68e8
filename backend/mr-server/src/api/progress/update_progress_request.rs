use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct UpdateProgressRequest {
    #[serde(rename = "courseId")]
    pub course_id: i64,
    pub completed: bool,
}
