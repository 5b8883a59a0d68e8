/// Configuration for the credential-endpoint rate limiter.
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Maximum attempts per window.
    pub max_attempts: u32,
    /// Window duration in seconds.
    pub window_secs: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_attempts: 10, // 10 attempts
            window_secs: 60,  // per minute
        }
    }
}
