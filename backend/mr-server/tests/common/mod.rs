#![allow(dead_code)]

//! Test infrastructure for mr-server API tests

use mr_auth::{
    CookiePolicy, IdentityResolver, LoginRateLimiter, RateLimitConfig, SameSitePolicy,
    SessionManager,
};
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode, header};
use http_body_util::BodyExt;
use mr_server::state::AppState;
use sqlx::SqlitePool;
use tower::ServiceExt;

/// Create a test pool with in-memory SQLite
pub async fn create_test_pool() -> SqlitePool {
    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .connect(":memory:")
        .await
        .expect("Failed to create test database");

    sqlx::query("PRAGMA foreign_keys = ON")
        .execute(&pool)
        .await
        .expect("Failed to enable foreign keys");

    sqlx::migrate!("../crates/mr-db/migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

/// Create AppState for testing (same-site cookies, no providers)
pub async fn create_test_app_state() -> AppState {
    create_test_app_state_with_limit(RateLimitConfig::default()).await
}

pub async fn create_test_app_state_with_limit(limit: RateLimitConfig) -> AppState {
    let pool = create_test_pool().await;
    let identity_store = Arc::new(mr_db::IdentityRepository::new(pool.clone()));
    let session_store = Arc::new(mr_db::SessionRepository::new(pool.clone()));

    AppState {
        pool,
        resolver: Arc::new(IdentityResolver::new(identity_store)),
        sessions: Arc::new(SessionManager::new(session_store, chrono::Duration::days(30))),
        providers: Arc::new(Vec::new()),
        cookies: CookiePolicy {
            session_name: "music_roadmap_session".to_string(),
            user_info_name: "user_info".to_string(),
            oauth_state_name: "oauth_state".to_string(),
            secure: false,
            same_site: SameSitePolicy::Lax,
            max_age_secs: 30 * 24 * 60 * 60,
        },
        login_limiter: Arc::new(LoginRateLimiter::new(limit)),
        frontend_url: "http://localhost:3001".to_string(),
        allowed_origins: vec!["http://localhost:3001".to_string()],
    }
}

/// Build a request with an optional Cookie header and optional JSON body
pub fn request(
    method: &str,
    uri: &str,
    cookie: Option<&str>,
    body: Option<serde_json::Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Run one request through the router and collect status, headers, and JSON
pub async fn send(
    app: &Router,
    req: Request<Body>,
) -> (StatusCode, HeaderMap, serde_json::Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };
    (status, headers, json)
}

/// Extract a `name=value` pair from Set-Cookie headers, suitable for a
/// request Cookie header. Returns None when the cookie was not set or was
/// cleared.
pub fn set_cookie_pair(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .find_map(|cookie| {
            let pair = cookie.split(';').next()?;
            let (k, v) = pair.split_once('=')?;
            (k == name && !v.is_empty()).then(|| pair.to_string())
        })
}

/// True when a Set-Cookie header expires the named cookie immediately
pub fn clears_cookie(headers: &HeaderMap, name: &str) -> bool {
    headers
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .any(|cookie| cookie.starts_with(&format!("{}=;", name)) && cookie.contains("Max-Age=0"))
}

/// Sign up a user and return the session Cookie header value
pub async fn signup(app: &Router, email: &str, username: &str, password: &str) -> String {
    let (status, headers, _) = send(
        app,
        request(
            "POST",
            "/auth/signup",
            None,
            Some(serde_json::json!({
                "email": email,
                "username": username,
                "password": password,
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "signup failed");
    set_cookie_pair(&headers, "music_roadmap_session").expect("no session cookie set")
}
