//! Password hashing with Argon2 over PHC-format strings.
//!
//! Every hash gets a fresh random salt. Plaintext passwords are never logged
//! and never stored.

use crate::{AuthError, Result as AuthErrorResult};

use std::panic::Location;

use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use error_location::ErrorLocation;
use password_hash::{PasswordHash, SaltString};

/// Hash a plaintext password into a PHC string with a random 16-byte salt.
#[track_caller]
pub fn hash_password(password: &str) -> AuthErrorResult<String> {
    let mut salt_bytes = [0u8; 16];
    getrandom::getrandom(&mut salt_bytes).map_err(|e| AuthError::PasswordHash {
        message: e.to_string(),
        location: ErrorLocation::from(Location::caller()),
    })?;
    let salt = SaltString::encode_b64(&salt_bytes).map_err(|e| AuthError::PasswordHash {
        message: e.to_string(),
        location: ErrorLocation::from(Location::caller()),
    })?;

    let phc = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::PasswordHash {
            message: e.to_string(),
            location: ErrorLocation::from(Location::caller()),
        })?
        .to_string();

    Ok(phc)
}

/// Verify a plaintext password against a stored PHC string.
///
/// A malformed stored hash verifies as false rather than erroring; the caller
/// reports the same `InvalidCredentials` outcome either way.
pub fn verify_password(phc: &str, password: &str) -> bool {
    match PasswordHash::new(phc) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}
