use crate::AuthUserDto;

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub authenticated: bool,
    pub user: Option<AuthUserDto>,
}
