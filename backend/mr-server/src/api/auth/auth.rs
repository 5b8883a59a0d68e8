//! Authentication route handlers.
//!
//! Local signup/login return JSON and set the session cookies directly. The
//! OAuth pair is a browser flow: the start route redirects to the provider
//! with a state cookie, and the callback verifies the assertion, establishes
//! the session, and redirects back to the frontend.

use crate::api::auth::auth_user_dto::AuthUserDto;
use crate::api::auth::login_request::LoginRequest;
use crate::api::auth::me_response::MeResponse;
use crate::api::auth::signup_request::SignupRequest;
use crate::{ApiError, ApiResult, CurrentIdentity};
use crate::state::AppState;

use mr_auth::cookie::cookie_value;
use mr_auth::{AuthProvider, generate_token};
use mr_core::{Identity, ProviderKind};

use std::panic::Location;
use std::str::FromStr;
use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderMap, HeaderValue, header::SET_COOKIE},
    response::{IntoResponse, Redirect, Response},
};
use error_location::ErrorLocation;
use log::{info, warn};
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize)]
pub struct OAuthCallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

// =============================================================================
// Handlers
// =============================================================================

/// GET /auth/{provider}
///
/// Redirect the browser to the provider's consent screen, pinning a random
/// state value in a short-lived cookie for the callback to check.
pub async fn oauth_start(
    State(state): State<AppState>,
    Path(provider): Path<String>,
) -> ApiResult<Response> {
    let provider = lookup_provider(&state, &provider)?;

    let oauth_state = generate_token();
    let mut headers = HeaderMap::new();
    append_cookie(&mut headers, state.cookies.oauth_state_cookie(&oauth_state))?;

    let url = provider.authorize_url(&oauth_state);
    Ok((headers, Redirect::temporary(&url)).into_response())
}

/// GET /auth/{provider}/callback
///
/// Resolve the provider assertion, establish a session, and send the browser
/// back to the frontend. Assertion failures bounce to the frontend login
/// page; only store faults surface as 500s.
pub async fn oauth_callback(
    State(state): State<AppState>,
    Path(provider): Path<String>,
    Query(query): Query<OAuthCallbackQuery>,
    request_headers: HeaderMap,
) -> ApiResult<Response> {
    let provider = lookup_provider(&state, &provider)?;

    let mut headers = HeaderMap::new();
    append_cookie(
        &mut headers,
        state.cookies.clear_cookie(&state.cookies.oauth_state_name),
    )?;

    let expected_state = cookie_value(&request_headers, &state.cookies.oauth_state_name);
    let state_matches = matches!(
        (&query.state, &expected_state),
        (Some(got), Some(expected)) if got == expected
    );

    let code = match (&query.code, state_matches, &query.error) {
        (Some(code), true, None) => code.clone(),
        _ => {
            warn!(
                "{} callback rejected: state_match={}, error={:?}",
                provider.kind(),
                state_matches,
                query.error
            );
            return Ok((headers, login_redirect(&state)).into_response());
        }
    };

    let assertion = match provider.verify(&code).await {
        Ok(assertion) => assertion,
        Err(e) => {
            warn!("{} assertion rejected: {}", provider.kind(), e);
            return Ok((headers, login_redirect(&state)).into_response());
        }
    };

    let identity = state.resolver.resolve_oauth(assertion).await?;
    info!("{} login for identity {}", provider.kind(), identity.id);

    establish_session(&state, &mut headers, &identity).await?;
    Ok((headers, Redirect::temporary(&state.frontend_url)).into_response())
}

/// POST /auth/signup
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> ApiResult<(HeaderMap, Json<MeResponse>)> {
    state.login_limiter.check()?;
    validate_signup(&request)?;

    let identity = state
        .resolver
        .signup_local(
            request.email.trim(),
            request.username.trim(),
            &request.password,
        )
        .await?;

    let mut headers = HeaderMap::new();
    establish_session(&state, &mut headers, &identity).await?;

    Ok((
        headers,
        Json(MeResponse {
            authenticated: true,
            user: Some(identity.into()),
        }),
    ))
}

/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<(HeaderMap, Json<MeResponse>)> {
    state.login_limiter.check()?;

    let identity = state
        .resolver
        .login_local(request.identifier.trim(), &request.password)
        .await?;

    let mut headers = HeaderMap::new();
    establish_session(&state, &mut headers, &identity).await?;

    Ok((
        headers,
        Json(MeResponse {
            authenticated: true,
            user: Some(identity.into()),
        }),
    ))
}

/// POST /auth/logout
///
/// Idempotent: succeeds with or without a live session, and always clears
/// both cookies.
pub async fn logout(
    State(state): State<AppState>,
    request_headers: HeaderMap,
) -> ApiResult<(HeaderMap, Json<serde_json::Value>)> {
    if let Some(token) = cookie_value(&request_headers, &state.cookies.session_name) {
        state.sessions.destroy(&token).await?;
    }

    let mut headers = HeaderMap::new();
    append_cookie(
        &mut headers,
        state.cookies.clear_cookie(&state.cookies.session_name),
    )?;
    append_cookie(
        &mut headers,
        state.cookies.clear_cookie(&state.cookies.user_info_name),
    )?;

    Ok((headers, Json(json!({ "success": true }))))
}

/// GET /auth/me
pub async fn me(identity: CurrentIdentity) -> Json<MeResponse> {
    let user = identity.0.map(AuthUserDto::from);
    Json(MeResponse {
        authenticated: user.is_some(),
        user,
    })
}

// =============================================================================
// Helpers
// =============================================================================

fn lookup_provider(state: &AppState, name: &str) -> ApiResult<Arc<dyn AuthProvider>> {
    let kind = ProviderKind::from_str(name).map_err(|_| ApiError::NotFound {
        message: format!("Unknown auth provider '{}'", name),
        location: ErrorLocation::from(Location::caller()),
    })?;

    state.provider(kind).ok_or_else(|| ApiError::NotFound {
        message: format!("Auth provider '{}' is not configured", kind),
        location: ErrorLocation::from(Location::caller()),
    })
}

fn login_redirect(state: &AppState) -> Redirect {
    Redirect::temporary(&format!("{}/login", state.frontend_url))
}

/// Issue the session cookie and the parallel user-info cookie.
async fn establish_session(
    state: &AppState,
    headers: &mut HeaderMap,
    identity: &Identity,
) -> ApiResult<()> {
    let session = state.sessions.create(identity.id).await?;
    let user: AuthUserDto = identity.clone().into();

    append_cookie(headers, state.cookies.session_cookie(&session.token))?;
    append_cookie(
        headers,
        state.cookies.user_info_cookie(&user.info_cookie_json()),
    )?;

    Ok(())
}

#[track_caller]
fn append_cookie(headers: &mut HeaderMap, cookie: String) -> ApiResult<()> {
    let value = HeaderValue::from_str(&cookie).map_err(|e| ApiError::Internal {
        message: format!("Invalid cookie header: {}", e),
        location: ErrorLocation::from(Location::caller()),
    })?;
    headers.append(SET_COOKIE, value);
    Ok(())
}

fn validate_signup(request: &SignupRequest) -> ApiResult<()> {
    let field_error = |field: &str, message: &str| ApiError::Validation {
        message: message.to_string(),
        field: Some(field.to_string()),
        location: ErrorLocation::from(Location::caller()),
    };

    let email = request.email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(field_error("email", "A valid email address is required"));
    }
    if request.username.trim().is_empty() {
        return Err(field_error("username", "Username is required"));
    }
    if request.password.len() < 6 {
        return Err(field_error(
            "password",
            "Password must be at least 6 characters",
        ));
    }

    Ok(())
}
