use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateReplyRequest {
    pub content: String,
}
