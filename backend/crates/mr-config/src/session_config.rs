use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_OAUTH_STATE_COOKIE, DEFAULT_SESSION_COOKIE,
    DEFAULT_SESSION_TTL_DAYS, DEFAULT_USER_INFO_COOKIE,
};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub cookie_name: String,
    pub user_info_cookie_name: String,
    pub oauth_state_cookie_name: String,
    pub ttl_days: u32,
    /// Cross-site deployment: frontend and API on different sites. Cookies
    /// are sent with `SameSite=None` and therefore require `secure`.
    pub cross_site: bool,
    pub secure: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: String::from(DEFAULT_SESSION_COOKIE),
            user_info_cookie_name: String::from(DEFAULT_USER_INFO_COOKIE),
            oauth_state_cookie_name: String::from(DEFAULT_OAUTH_STATE_COOKIE),
            ttl_days: DEFAULT_SESSION_TTL_DAYS,
            cross_site: false,
            secure: false,
        }
    }
}

impl SessionConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.cookie_name.is_empty() {
            return Err(ConfigError::session("session.cookie_name must not be empty"));
        }

        if self.ttl_days == 0 {
            return Err(ConfigError::session("session.ttl_days must be >= 1"));
        }

        // Browsers drop SameSite=None cookies without Secure; an insecure
        // cross-site deployment cannot work, so reject it at startup.
        if self.cross_site && !self.secure {
            return Err(ConfigError::session(
                "session.cross_site requires session.secure = true",
            ));
        }

        Ok(())
    }

    pub fn max_age_secs(&self) -> i64 {
        i64::from(self.ttl_days) * 24 * 60 * 60
    }
}
