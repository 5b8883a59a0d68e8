pub mod error;
pub mod repositories;
pub mod row;

pub use error::{DbError, Result};
pub use repositories::category_repository::CategoryRepository;
pub use repositories::forum_repository::ForumRepository;
pub use repositories::identity_repository::IdentityRepository;
pub use repositories::progress_repository::ProgressRepository;
pub use repositories::session_repository::SessionRepository;
