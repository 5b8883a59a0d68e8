use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Email address or username.
    pub identifier: String,
    pub password: String,
}
