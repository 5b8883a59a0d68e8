use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HelpfulResponse {
    pub marked: bool,
    pub helpful_count: i64,
}
