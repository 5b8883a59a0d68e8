use crate::ProgressDto;

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ProgressListResponse {
    pub progress: Vec<ProgressDto>,
}
