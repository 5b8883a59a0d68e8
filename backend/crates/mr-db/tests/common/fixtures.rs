use mr_core::{AuthAssertion, Identity, ProviderKind};

use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

/// Creates a local-signup Identity with sensible defaults
pub fn create_local_identity(email: &str, username: &str) -> Identity {
    Identity::from_signup(
        email.to_string(),
        username.to_string(),
        "$argon2id$v=19$m=19456,t=2,p=1$c3R1YnNhbHQ$c3R1Ymhhc2g".to_string(),
        Utc::now(),
    )
}

/// Creates a social-only Identity linked to a Google provider id
pub fn create_google_identity(provider_user_id: &str, email: &str) -> Identity {
    let assertion = AuthAssertion {
        provider: ProviderKind::Google,
        provider_user_id: provider_user_id.to_string(),
        email: email.to_string(),
        display_name: "Test User".to_string(),
        avatar_url: None,
    };
    Identity::from_assertion(&assertion, Utc::now())
}

/// Inserts a user row directly for foreign key constraints
pub async fn insert_test_user(pool: &SqlitePool, user_id: Uuid) {
    let id = user_id.to_string();
    let email = format!("test-{}@example.com", user_id);

    sqlx::query(
        "INSERT INTO users (id, email, username, created_at, last_login) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&id)
    .bind(&email)
    .bind("test-user")
    .bind(Utc::now().timestamp())
    .bind(Utc::now().timestamp())
    .execute(pool)
    .await
    .expect("Failed to create test user");
}
