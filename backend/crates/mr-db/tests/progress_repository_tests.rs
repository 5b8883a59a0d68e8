mod common;

use common::{create_test_pool, insert_test_user};

use mr_db::ProgressRepository;

use googletest::prelude::*;
use uuid::Uuid;

#[tokio::test]
async fn given_no_progress_when_listed_then_empty() {
    let pool = create_test_pool().await;
    let user_id = Uuid::new_v4();
    insert_test_user(&pool, user_id).await;
    let repo = ProgressRepository::new(pool);

    let progress = repo.list_for_user(user_id).await.unwrap();

    assert_that!(progress, is_empty());
}

#[tokio::test]
async fn given_completed_course_when_upserted_then_completion_recorded() {
    let pool = create_test_pool().await;
    let user_id = Uuid::new_v4();
    insert_test_user(&pool, user_id).await;
    let repo = ProgressRepository::new(pool);

    let progress = repo.upsert(user_id, 3, true).await.unwrap();

    assert_that!(progress.course_id, eq(3));
    assert_that!(progress.completed, eq(true));
    assert_that!(progress.completed_at, some(anything()));
}

#[tokio::test]
async fn given_existing_progress_when_upserted_again_then_single_row_updated() {
    let pool = create_test_pool().await;
    let user_id = Uuid::new_v4();
    insert_test_user(&pool, user_id).await;
    let repo = ProgressRepository::new(pool);

    repo.upsert(user_id, 3, true).await.unwrap();
    let progress = repo.upsert(user_id, 3, false).await.unwrap();

    assert_that!(progress.completed, eq(false));
    assert_that!(progress.completed_at, none());
    assert_that!(repo.list_for_user(user_id).await.unwrap().len(), eq(1));
}

#[tokio::test]
async fn given_two_users_when_listing_then_progress_is_scoped() {
    let pool = create_test_pool().await;
    let user_a = Uuid::new_v4();
    let user_b = Uuid::new_v4();
    insert_test_user(&pool, user_a).await;
    insert_test_user(&pool, user_b).await;
    let repo = ProgressRepository::new(pool);

    repo.upsert(user_a, 1, true).await.unwrap();
    repo.upsert(user_a, 2, false).await.unwrap();
    repo.upsert(user_b, 1, true).await.unwrap();

    let for_a = repo.list_for_user(user_a).await.unwrap();
    let for_b = repo.list_for_user(user_b).await.unwrap();

    assert_that!(for_a.len(), eq(2));
    assert_that!(for_b.len(), eq(1));
}
