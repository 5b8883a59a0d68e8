//! OAuth browser-flow tests over the router with a stubbed provider.

mod common;

use common::{create_test_app_state, request, send, set_cookie_pair};

use mr_auth::{AuthError, AuthProvider};
use mr_core::{AuthAssertion, ProviderKind};
use mr_db::IdentityRepository;
use mr_server::build_router;
use mr_server::state::AppState;

use std::sync::Arc;

use axum::http::{StatusCode, header};
use serde_json::json;

/// Provider double: accepts exactly one code and returns a fixed assertion.
struct StubProvider {
    assertion: AuthAssertion,
}

#[async_trait::async_trait]
impl AuthProvider for StubProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Google
    }

    fn authorize_url(&self, state: &str) -> String {
        format!("https://provider.example/authorize?state={state}")
    }

    async fn verify(&self, code: &str) -> mr_auth::Result<AuthAssertion> {
        if code == "good-code" {
            Ok(self.assertion.clone())
        } else {
            Err(AuthError::ProviderAssertionInvalid {
                message: "bad code".to_string(),
                location: error_location::ErrorLocation::from(std::panic::Location::caller()),
            })
        }
    }
}

fn assertion(provider_user_id: &str, email: &str) -> AuthAssertion {
    AuthAssertion {
        provider: ProviderKind::Google,
        provider_user_id: provider_user_id.to_string(),
        email: email.to_string(),
        display_name: "kofi".to_string(),
        avatar_url: Some("https://example.com/kofi.png".to_string()),
    }
}

async fn state_with_stub(assertion: AuthAssertion) -> AppState {
    let mut state = create_test_app_state().await;
    let providers: Vec<Arc<dyn AuthProvider>> = vec![Arc::new(StubProvider { assertion })];
    state.providers = Arc::new(providers);
    state
}

fn location_of(headers: &axum::http::HeaderMap) -> String {
    headers
        .get(header::LOCATION)
        .and_then(|h| h.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

#[tokio::test]
async fn given_oauth_start_then_redirects_with_state_cookie() {
    let state = state_with_stub(assertion("g-123", "a@x.com")).await;
    let app = build_router(state);

    let (status, headers, _) = send(&app, request("GET", "/auth/google", None, None)).await;

    assert_eq!(status, StatusCode::TEMPORARY_REDIRECT);
    let oauth_state = set_cookie_pair(&headers, "oauth_state").unwrap();
    let value = oauth_state.split_once('=').unwrap().1.to_string();
    assert!(location_of(&headers).contains(&format!("state={value}")));
}

#[tokio::test]
async fn given_valid_callback_then_creates_identity_and_session() {
    let state = state_with_stub(assertion("g-123", "a@x.com")).await;
    let app = build_router(state.clone());

    let (_, headers, _) = send(&app, request("GET", "/auth/google", None, None)).await;
    let state_cookie = set_cookie_pair(&headers, "oauth_state").unwrap();
    let state_value = state_cookie.split_once('=').unwrap().1.to_string();

    let (status, headers, _) = send(
        &app,
        request(
            "GET",
            &format!("/auth/google/callback?code=good-code&state={state_value}"),
            Some(&state_cookie),
            None,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location_of(&headers), "http://localhost:3001");
    let session = set_cookie_pair(&headers, "music_roadmap_session").unwrap();
    assert!(set_cookie_pair(&headers, "user_info").is_some());

    // The session authenticates follow-up requests.
    let (_, _, body) = send(&app, request("GET", "/auth/me", Some(&session), None)).await;
    assert_eq!(body["authenticated"], true);
    assert_eq!(body["user"]["email"], "a@x.com");

    let repo = IdentityRepository::new(state.pool.clone());
    let identity = repo
        .find_by_provider(ProviderKind::Google, "g-123")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(identity.email, "a@x.com");
}

#[tokio::test]
async fn given_state_mismatch_then_bounces_to_login_without_session() {
    let state = state_with_stub(assertion("g-123", "a@x.com")).await;
    let app = build_router(state);

    let (_, headers, _) = send(&app, request("GET", "/auth/google", None, None)).await;
    let state_cookie = set_cookie_pair(&headers, "oauth_state").unwrap();

    let (status, headers, _) = send(
        &app,
        request(
            "GET",
            "/auth/google/callback?code=good-code&state=forged",
            Some(&state_cookie),
            None,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location_of(&headers), "http://localhost:3001/login");
    assert!(set_cookie_pair(&headers, "music_roadmap_session").is_none());
}

#[tokio::test]
async fn given_rejected_code_then_bounces_to_login() {
    let state = state_with_stub(assertion("g-123", "a@x.com")).await;
    let app = build_router(state);

    let (_, headers, _) = send(&app, request("GET", "/auth/google", None, None)).await;
    let state_cookie = set_cookie_pair(&headers, "oauth_state").unwrap();
    let state_value = state_cookie.split_once('=').unwrap().1.to_string();

    let (status, headers, _) = send(
        &app,
        request(
            "GET",
            &format!("/auth/google/callback?code=stale-code&state={state_value}"),
            Some(&state_cookie),
            None,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location_of(&headers), "http://localhost:3001/login");
    assert!(set_cookie_pair(&headers, "music_roadmap_session").is_none());
}

#[tokio::test]
async fn given_local_account_when_oauth_email_matches_then_linked_not_duplicated() {
    let state = state_with_stub(assertion("g-123", "a@x.com")).await;
    let app = build_router(state.clone());

    // Existing local account under the same email.
    let (status, _, _) = send(
        &app,
        request(
            "POST",
            "/auth/signup",
            None,
            Some(json!({"email": "a@x.com", "username": "kofi", "password": "secret1"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, headers, _) = send(&app, request("GET", "/auth/google", None, None)).await;
    let state_cookie = set_cookie_pair(&headers, "oauth_state").unwrap();
    let state_value = state_cookie.split_once('=').unwrap().1.to_string();

    let (status, _, _) = send(
        &app,
        request(
            "GET",
            &format!("/auth/google/callback?code=good-code&state={state_value}"),
            Some(&state_cookie),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::TEMPORARY_REDIRECT);

    // One identity with both the password hash and the provider id.
    let users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(&state.pool)
        .await
        .unwrap();
    assert_eq!(users, 1);

    let repo = IdentityRepository::new(state.pool.clone());
    let identity = repo
        .find_by_provider(ProviderKind::Google, "g-123")
        .await
        .unwrap()
        .unwrap();
    assert!(identity.password_hash.is_some());
}
