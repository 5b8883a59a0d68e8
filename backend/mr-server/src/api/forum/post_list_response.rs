use crate::PostDto;

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct PostListResponse {
    pub posts: Vec<PostDto>,
    pub page: i64,
    pub per_page: i64,
    pub total: i64,
}
