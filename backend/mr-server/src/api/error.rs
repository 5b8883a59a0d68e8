//! REST API error types
//!
//! These errors are designed to produce consistent JSON responses
//! with appropriate HTTP status codes.

use mr_auth::{AuthError, StoreError};
use mr_db::DbError;

use std::panic::Location;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use error_location::ErrorLocation;
use serde::Serialize;
use thiserror::Error;

/// JSON error response body
#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

/// Inner error body with code, message, and optional field
#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    /// Machine-readable error code (e.g., "EMAIL_TAKEN", "UNAUTHENTICATED")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Field name if this is a validation error for a specific field
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

/// API errors with associated HTTP status codes
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource not found (404)
    #[error("Resource not found: {message} {location}")]
    NotFound {
        message: String,
        location: ErrorLocation,
    },

    /// Validation error (400)
    #[error("Validation failed: {message} {location}")]
    Validation {
        message: String,
        field: Option<String>,
        location: ErrorLocation,
    },

    /// Bad request (400)
    #[error("Bad request: {message} {location}")]
    BadRequest {
        message: String,
        location: ErrorLocation,
    },

    /// Internal server error (500)
    #[error("Internal error: {message} {location}")]
    Internal {
        message: String,
        location: ErrorLocation,
    },

    /// Auth-core outcome, mapped per variant below
    #[error("Auth error: {source}")]
    Auth {
        #[from]
        source: AuthError,
    },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Log the error with location for debugging
        log::error!("{}", self);

        let (status, body) = match self {
            ApiError::NotFound { message, .. } => (
                StatusCode::NOT_FOUND,
                ApiErrorBody {
                    code: "NOT_FOUND".into(),
                    message,
                    field: None,
                },
            ),
            ApiError::Validation { message, field, .. } => (
                StatusCode::BAD_REQUEST,
                ApiErrorBody {
                    code: "VALIDATION_ERROR".into(),
                    message,
                    field,
                },
            ),
            ApiError::BadRequest { message, .. } => (
                StatusCode::BAD_REQUEST,
                ApiErrorBody {
                    code: "BAD_REQUEST".into(),
                    message,
                    field: None,
                },
            ),
            ApiError::Internal { message, .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiErrorBody {
                    code: "INTERNAL_ERROR".into(),
                    message,
                    field: None,
                },
            ),
            ApiError::Auth { source } => auth_error_body(source),
        };

        (status, Json(ApiErrorResponse { error: body })).into_response()
    }
}

/// Map auth-core outcomes to status codes and stable client messages.
///
/// `InvalidCredentials` covers unknown identifier and wrong password with one
/// message; store and hashing faults return a generic body with the detail
/// kept server-side.
fn auth_error_body(source: AuthError) -> (StatusCode, ApiErrorBody) {
    let (status, code, message) = match &source {
        AuthError::InvalidCredentials { .. } => (
            StatusCode::UNAUTHORIZED,
            "INVALID_CREDENTIALS",
            "Invalid credentials".to_string(),
        ),
        AuthError::AccountHasNoPassword { .. } => (
            StatusCode::UNAUTHORIZED,
            "ACCOUNT_HAS_NO_PASSWORD",
            "This account signs in with Google or Microsoft".to_string(),
        ),
        AuthError::EmailTaken { .. } => (
            StatusCode::CONFLICT,
            "EMAIL_TAKEN",
            "An account with this email already exists".to_string(),
        ),
        AuthError::Unauthenticated { .. } => (
            StatusCode::UNAUTHORIZED,
            "UNAUTHENTICATED",
            "Authentication required".to_string(),
        ),
        AuthError::ProviderAssertionInvalid { .. } => (
            StatusCode::BAD_REQUEST,
            "PROVIDER_ASSERTION_INVALID",
            "Sign-in could not be verified".to_string(),
        ),
        AuthError::RateLimited {
            limit, window_secs, ..
        } => (
            StatusCode::TOO_MANY_REQUESTS,
            "RATE_LIMITED",
            format!("Too many attempts, limit is {limit} per {window_secs}s"),
        ),
        AuthError::PasswordHash { .. } | AuthError::Store { .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL_ERROR",
            "Internal server error".to_string(),
        ),
    };

    (
        status,
        ApiErrorBody {
            code: code.into(),
            message,
            field: None,
        },
    )
}

/// Convert session-store faults to API errors
impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        ApiError::Auth {
            source: AuthError::Store { source: e },
        }
    }
}

/// Convert database errors to API errors
impl From<DbError> for ApiError {
    #[track_caller]
    fn from(e: DbError) -> Self {
        // Don't expose internal database details to clients
        log::error!("Database error: {}", e);
        ApiError::Internal {
            message: "Database operation failed".to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

/// Convert UUID parse errors to API errors
impl From<uuid::Error> for ApiError {
    #[track_caller]
    fn from(e: uuid::Error) -> Self {
        ApiError::Validation {
            message: format!("Invalid id format: {}", e),
            field: None,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
