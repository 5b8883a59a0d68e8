use crate::{PostDto, ReplyDto};

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct PostDetailResponse {
    pub post: PostDto,
    pub replies: Vec<ReplyDto>,
}
