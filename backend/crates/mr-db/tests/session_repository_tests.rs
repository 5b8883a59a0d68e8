mod common;

use common::{create_test_pool, insert_test_user};

use mr_core::Session;
use mr_db::SessionRepository;

use chrono::{Duration, Utc};
use googletest::prelude::*;
use uuid::Uuid;

fn session_for(identity_id: Uuid, token: &str) -> Session {
    let now = Utc::now();
    Session {
        token: token.to_string(),
        identity_id,
        created_at: now,
        expires_at: now + Duration::days(30),
    }
}

#[tokio::test]
async fn given_inserted_session_when_found_by_token_then_binding_round_trips() {
    let pool = create_test_pool().await;
    let user_id = Uuid::new_v4();
    insert_test_user(&pool, user_id).await;
    let repo = SessionRepository::new(pool);

    repo.insert_session(&session_for(user_id, "tok-1"))
        .await
        .unwrap();

    let found = repo.find_by_token("tok-1").await.unwrap();
    assert_that!(found, some(anything()));
    assert_that!(found.unwrap().identity_id, eq(user_id));
}

#[tokio::test]
async fn given_unknown_token_when_found_then_none() {
    let pool = create_test_pool().await;
    let repo = SessionRepository::new(pool);

    let found = repo.find_by_token("missing").await.unwrap();

    assert_that!(found, none());
}

#[tokio::test]
async fn given_deleted_token_when_deleted_again_then_no_error() {
    let pool = create_test_pool().await;
    let user_id = Uuid::new_v4();
    insert_test_user(&pool, user_id).await;
    let repo = SessionRepository::new(pool);
    repo.insert_session(&session_for(user_id, "tok-1"))
        .await
        .unwrap();

    repo.delete_by_token("tok-1").await.unwrap();
    repo.delete_by_token("tok-1").await.unwrap();

    assert_that!(repo.find_by_token("tok-1").await.unwrap(), none());
}

#[tokio::test]
async fn given_multiple_sessions_when_user_revoked_then_only_theirs_removed() {
    let pool = create_test_pool().await;
    let user_a = Uuid::new_v4();
    let user_b = Uuid::new_v4();
    insert_test_user(&pool, user_a).await;
    insert_test_user(&pool, user_b).await;
    let repo = SessionRepository::new(pool);
    repo.insert_session(&session_for(user_a, "a-1")).await.unwrap();
    repo.insert_session(&session_for(user_a, "a-2")).await.unwrap();
    repo.insert_session(&session_for(user_b, "b-1")).await.unwrap();

    let removed = repo.delete_by_user(user_a).await.unwrap();

    assert_that!(removed, eq(2));
    assert_that!(repo.find_by_token("a-1").await.unwrap(), none());
    assert_that!(repo.find_by_token("b-1").await.unwrap(), some(anything()));
}
