use crate::StoreError;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    /// Unknown identifier or wrong password. Deliberately a single variant so
    /// callers cannot distinguish the two cases and leak account existence.
    #[error("Invalid credentials {location}")]
    InvalidCredentials { location: ErrorLocation },

    #[error("Email already registered {location}")]
    EmailTaken { location: ErrorLocation },

    /// Local login attempted against a social-only account.
    #[error("Account has no password credential {location}")]
    AccountHasNoPassword { location: ErrorLocation },

    #[error("Missing or expired session {location}")]
    Unauthenticated { location: ErrorLocation },

    #[error("Provider assertion invalid: {message} {location}")]
    ProviderAssertionInvalid {
        message: String,
        location: ErrorLocation,
    },

    #[error("Rate limit exceeded: {limit} attempts per {window_secs}s {location}")]
    RateLimited {
        limit: u32,
        window_secs: u64,
        location: ErrorLocation,
    },

    #[error("Password hashing failed: {message} {location}")]
    PasswordHash {
        message: String,
        location: ErrorLocation,
    },

    #[error("Credential store error: {source}")]
    Store {
        #[from]
        source: StoreError,
    },
}

pub type Result<T> = std::result::Result<T, AuthError>;
