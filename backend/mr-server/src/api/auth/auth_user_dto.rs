use mr_core::Identity;

use serde::Serialize;
use uuid::Uuid;

/// Public identity fields safe to hand to the frontend.
#[derive(Debug, Clone, Serialize)]
pub struct AuthUserDto {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub profile_picture: Option<String>,
}

impl From<Identity> for AuthUserDto {
    fn from(identity: Identity) -> Self {
        Self {
            id: identity.id,
            email: identity.email,
            username: identity.username,
            profile_picture: identity.profile_picture,
        }
    }
}

impl AuthUserDto {
    /// JSON for the non-authoritative user-info cookie. Keys match what the
    /// frontend reads; never parsed back by the server.
    pub fn info_cookie_json(&self) -> String {
        serde_json::json!({
            "id": self.id,
            "email": self.email,
            "username": self.username,
            "profilePicture": self.profile_picture,
        })
        .to_string()
    }
}
