pub mod api;
pub mod error;
pub mod health;
pub mod logger;
pub mod routes;
pub mod state;

pub use api::{
    auth::{
        auth::{login, logout, me, oauth_callback, oauth_start, signup},
        auth_user_dto::AuthUserDto,
        login_request::LoginRequest,
        me_response::MeResponse,
        signup_request::SignupRequest,
    },
    categories::{
        categories::list_categories, category_dto::CategoryDto,
        category_list_response::CategoryListResponse,
    },
    error::ApiError,
    error::Result as ApiResult,
    extractors::identity::{CurrentIdentity, RequireIdentity},
    forum::{
        create_post_request::CreatePostRequest,
        create_reply_request::CreateReplyRequest,
        forum::{create_post, create_reply, get_post, list_posts, toggle_helpful},
        helpful_response::HelpfulResponse,
        post_detail_response::PostDetailResponse,
        post_dto::PostDto,
        post_list_response::PostListResponse,
        reply_dto::ReplyDto,
    },
    progress::{
        progress::{list_progress, update_progress},
        progress_dto::ProgressDto,
        progress_list_response::ProgressListResponse,
        update_progress_request::UpdateProgressRequest,
    },
};

pub use crate::routes::build_router;
pub use crate::state::AppState;
