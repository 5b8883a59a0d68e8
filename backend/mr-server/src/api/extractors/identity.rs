//! Axum extractors forming the per-request authorization gate.
//!
//! Per request the outcome is terminal: no token, or an invalid/expired
//! token, resolves to no identity; a valid token resolves to the bound
//! identity. Only store faults propagate as errors.

use crate::ApiError;
use crate::state::AppState;

use mr_auth::AuthError;
use mr_auth::cookie::cookie_value;
use mr_core::Identity;

use std::future::Future;
use std::panic::Location;

use axum::{extract::FromRequestParts, http::request::Parts};
use error_location::ErrorLocation;

/// The request's identity, if any. Extraction never rejects a guest; routes
/// using this serve both audiences and branch on the option.
pub struct CurrentIdentity(pub Option<Identity>);

/// The request's identity, required. Rejects with 401 before the handler
/// runs when no valid session resolves.
pub struct RequireIdentity(pub Identity);

async fn resolve_identity(
    parts: &Parts,
    state: &AppState,
) -> Result<Option<Identity>, ApiError> {
    let Some(token) = cookie_value(&parts.headers, &state.cookies.session_name) else {
        return Ok(None);
    };

    let Some(identity_id) = state.sessions.validate(&token).await? else {
        return Ok(None);
    };

    // Session without a backing identity row: treat as logged out.
    Ok(state.resolver.identity_by_id(identity_id).await?)
}

impl FromRequestParts<AppState> for CurrentIdentity {
    type Rejection = ApiError;

    #[allow(clippy::manual_async_fn)]
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        async move { Ok(CurrentIdentity(resolve_identity(parts, state).await?)) }
    }
}

impl FromRequestParts<AppState> for RequireIdentity {
    type Rejection = ApiError;

    #[allow(clippy::manual_async_fn)]
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        async move {
            match resolve_identity(parts, state).await? {
                Some(identity) => Ok(RequireIdentity(identity)),
                None => Err(ApiError::from(AuthError::Unauthenticated {
                    location: ErrorLocation::from(Location::caller()),
                })),
            }
        }
    }
}
