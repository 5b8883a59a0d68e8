use crate::api::{auth::auth, categories::categories, forum::forum, progress::progress};
use crate::health;
use crate::state::AppState;

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use log::warn;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Build the application router with all endpoints
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.allowed_origins);

    Router::new()
        // Auth endpoints
        .route("/auth/signup", post(auth::signup))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/me", get(auth::me))
        .route("/auth/{provider}", get(auth::oauth_start))
        .route("/auth/{provider}/callback", get(auth::oauth_callback))
        // Health check endpoint
        .route("/api/health", get(health::health))
        // Data endpoints
        .route("/api/categories", get(categories::list_categories))
        .route(
            "/api/forum/posts",
            get(forum::list_posts).post(forum::create_post),
        )
        .route("/api/forum/posts/{id}", get(forum::get_post))
        .route("/api/forum/posts/{id}/replies", post(forum::create_reply))
        .route("/api/forum/replies/{id}/helpful", post(forum::toggle_helpful))
        .route(
            "/api/progress",
            get(progress::list_progress).post(progress::update_progress),
        )
        // Add shared state
        .with_state(state)
        // CORS: explicit allow-list with credentials, matching the cookie
        // topology; wildcard origins cannot be combined with credentials.
        .layer(cors)
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring malformed CORS origin '{}'", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}
