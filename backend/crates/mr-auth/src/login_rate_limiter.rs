use crate::{AuthError, RateLimitConfig, Result as AuthErrorResult};

use std::num::NonZeroU32;
use std::panic::Location;
use std::time::Duration;

use error_location::ErrorLocation;
use governor::{
    Quota, RateLimiter,
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
};

/// Brake on credential-guessing against the local login and signup routes.
pub struct LoginRateLimiter {
    limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
    config: RateLimitConfig,
}

impl LoginRateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        let max_attempts = NonZeroU32::new(config.max_attempts.max(1)).unwrap();
        // One replenished attempt per window/max so a full burst takes the
        // whole window to recover.
        let period = Duration::from_secs(config.window_secs.max(1)) / max_attempts.get();
        let quota = Quota::with_period(period)
            .unwrap_or_else(|| Quota::per_second(NonZeroU32::new(1).unwrap()))
            .allow_burst(max_attempts);

        Self {
            limiter: RateLimiter::direct(quota),
            config,
        }
    }

    /// Check whether another attempt is allowed right now.
    #[track_caller]
    pub fn check(&self) -> AuthErrorResult<()> {
        self.limiter.check().map_err(|_| AuthError::RateLimited {
            limit: self.config.max_attempts,
            window_secs: self.config.window_secs,
            location: ErrorLocation::from(Location::caller()),
        })
    }
}

impl Default for LoginRateLimiter {
    fn default() -> Self {
        Self::new(RateLimitConfig::default())
    }
}
