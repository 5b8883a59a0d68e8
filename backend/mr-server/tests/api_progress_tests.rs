//! Integration tests for progress API handlers

mod common;

use common::{create_test_app_state, request, send, signup};

use mr_server::build_router;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn given_guest_when_fetching_progress_then_unauthenticated() {
    let state = create_test_app_state().await;
    let app = build_router(state);

    let (status, _, body) = send(&app, request("GET", "/api/progress", None, None)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "UNAUTHENTICATED");
}

#[tokio::test]
async fn given_user_when_updating_progress_then_upsert_and_listing_reflect_it() {
    let state = create_test_app_state().await;
    let app = build_router(state);
    let session = signup(&app, "a@x.com", "kofi", "secret1").await;

    let (status, _, body) = send(
        &app,
        request(
            "POST",
            "/api/progress",
            Some(&session),
            Some(json!({"courseId": 3, "completed": true})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["course_id"], 3);
    assert_eq!(body["completed"], true);
    assert!(!body["completed_at"].is_null());

    // Flip it back: still one row, now incomplete.
    let (_, _, body) = send(
        &app,
        request(
            "POST",
            "/api/progress",
            Some(&session),
            Some(json!({"courseId": 3, "completed": false})),
        ),
    )
    .await;
    assert_eq!(body["completed"], false);
    assert!(body["completed_at"].is_null());

    let (status, _, body) = send(&app, request("GET", "/api/progress", Some(&session), None)).await;
    assert_eq!(status, StatusCode::OK);
    let progress = body["progress"].as_array().unwrap();
    assert_eq!(progress.len(), 1);
    assert_eq!(progress[0]["course_id"], 3);
}

#[tokio::test]
async fn given_two_users_when_listing_progress_then_scoped_to_identity() {
    let state = create_test_app_state().await;
    let app = build_router(state);
    let first = signup(&app, "a@x.com", "kofi", "secret1").await;
    let second = signup(&app, "b@x.com", "ama", "secret2").await;

    send(
        &app,
        request(
            "POST",
            "/api/progress",
            Some(&first),
            Some(json!({"courseId": 1, "completed": true})),
        ),
    )
    .await;

    let (_, _, body) = send(&app, request("GET", "/api/progress", Some(&second), None)).await;

    assert_eq!(body["progress"].as_array().unwrap().len(), 0);
}
