pub mod auth;
pub mod auth_user_dto;
pub mod login_request;
pub mod me_response;
pub mod signup_request;
