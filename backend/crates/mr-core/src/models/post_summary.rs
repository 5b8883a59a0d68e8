use crate::ForumPost;

/// A post joined with the author and category fields list views need.
#[derive(Debug, Clone)]
pub struct PostSummary {
    pub post: ForumPost,
    pub username: String,
    pub profile_picture: Option<String>,
    pub category_name: Option<String>,
    pub reply_count: i64,
}
