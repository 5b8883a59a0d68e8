use crate::ForumReply;

/// A reply joined with author fields plus viewer-dependent helpful state.
///
/// `marked_helpful_by_user` is always false for guest viewers.
#[derive(Debug, Clone)]
pub struct ReplyView {
    pub reply: ForumReply,
    pub username: String,
    pub profile_picture: Option<String>,
    pub helpful_count: i64,
    pub marked_helpful_by_user: bool,
}
