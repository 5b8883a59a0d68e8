use std::panic::Location;

use error_location::ErrorLocation;
use mr_auth::StoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLx error: {source} {location}")]
    Sqlx {
        source: sqlx::Error,
        location: ErrorLocation,
    },

    #[error("Unique constraint violation: {message} {location}")]
    UniqueViolation {
        message: String,
        location: ErrorLocation,
    },

    #[error("Row decode failed: {message} {location}")]
    Decode {
        message: String,
        location: ErrorLocation,
    },
}

impl From<sqlx::Error> for DbError {
    #[track_caller]
    fn from(source: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &source
            && db_err.is_unique_violation()
        {
            return Self::UniqueViolation {
                message: db_err.message().to_string(),
                location: ErrorLocation::from(Location::caller()),
            };
        }

        Self::Sqlx {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

/// Collapse database faults into the store contract the auth core consumes:
/// unique violations stay typed (they drive race resolution), everything
/// else is a store-unavailable fault.
impl From<DbError> for StoreError {
    #[track_caller]
    fn from(e: DbError) -> Self {
        match e {
            DbError::UniqueViolation { message, .. } => StoreError::UniqueViolation {
                message,
                location: ErrorLocation::from(Location::caller()),
            },
            other => StoreError::Unavailable {
                message: other.to_string(),
                location: ErrorLocation::from(Location::caller()),
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, DbError>;
