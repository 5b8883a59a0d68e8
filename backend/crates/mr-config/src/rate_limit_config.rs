use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_RATE_LIMIT_ATTEMPTS, DEFAULT_RATE_LIMIT_WINDOW_SECS,
};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Maximum login/signup attempts per window
    pub max_attempts: u32,
    /// Window duration in seconds
    pub window_secs: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_RATE_LIMIT_ATTEMPTS,
            window_secs: DEFAULT_RATE_LIMIT_WINDOW_SECS,
        }
    }
}

impl RateLimitConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.max_attempts == 0 {
            return Err(ConfigError::config("rate_limit.max_attempts must be >= 1"));
        }
        if self.window_secs == 0 {
            return Err(ConfigError::config("rate_limit.window_secs must be >= 1"));
        }
        Ok(())
    }
}
