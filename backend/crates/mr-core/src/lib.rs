pub mod error;
pub mod models;

pub use error::{CoreError, Result};
pub use models::assertion::AuthAssertion;
pub use models::category::Category;
pub use models::course_progress::CourseProgress;
pub use models::forum_post::ForumPost;
pub use models::forum_reply::ForumReply;
pub use models::identity::Identity;
pub use models::post_summary::PostSummary;
pub use models::provider_kind::ProviderKind;
pub use models::reply_view::ReplyView;
pub use models::session::Session;

#[cfg(test)]
mod tests;
