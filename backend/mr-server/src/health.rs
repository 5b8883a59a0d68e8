use crate::CurrentIdentity;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// GET /api/health - liveness plus auth-state echo
pub async fn health(identity: CurrentIdentity) -> Response {
    let body = json!({
        "status": "OK",
        "version": env!("CARGO_PKG_VERSION"),
        "authenticated": identity.0.is_some(),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    (StatusCode::OK, Json(body)).into_response()
}
