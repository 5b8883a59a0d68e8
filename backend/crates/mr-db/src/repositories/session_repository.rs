//! SQL-backed session store, token -> identity.

use crate::Result as DbErrorResult;
use crate::row::{timestamp_column, uuid_column};

use mr_auth::store::{SessionStore, StoreError, StoreResult};
use mr_core::Session;

use sqlx::Row;
use sqlx::SqlitePool;
use sqlx::sqlite::SqliteRow;
use uuid::Uuid;

pub struct SessionRepository {
    pool: SqlitePool,
}

impl SessionRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn map_row(row: &SqliteRow) -> DbErrorResult<Session> {
        Ok(Session {
            token: row.try_get("token")?,
            identity_id: uuid_column(row, "user_id")?,
            created_at: timestamp_column(row, "created_at")?,
            expires_at: timestamp_column(row, "expires_at")?,
        })
    }

    pub async fn insert_session(&self, session: &Session) -> DbErrorResult<()> {
        sqlx::query(
            "INSERT INTO sessions (token, user_id, created_at, expires_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&session.token)
        .bind(session.identity_id.to_string())
        .bind(session.created_at.timestamp())
        .bind(session.expires_at.timestamp())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn find_by_token(&self, token: &str) -> DbErrorResult<Option<Session>> {
        let row = sqlx::query(
            "SELECT token, user_id, created_at, expires_at FROM sessions WHERE token = ?",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(Self::map_row).transpose()
    }

    pub async fn delete_by_token(&self, token: &str) -> DbErrorResult<()> {
        sqlx::query("DELETE FROM sessions WHERE token = ?")
            .bind(token)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn delete_by_user(&self, identity_id: Uuid) -> DbErrorResult<u64> {
        let result = sqlx::query("DELETE FROM sessions WHERE user_id = ?")
            .bind(identity_id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

#[async_trait::async_trait]
impl SessionStore for SessionRepository {
    async fn insert(&self, session: &Session) -> StoreResult<()> {
        self.insert_session(session)
            .await
            .map_err(StoreError::from)
    }

    async fn get(&self, token: &str) -> StoreResult<Option<Session>> {
        self.find_by_token(token).await.map_err(StoreError::from)
    }

    async fn delete(&self, token: &str) -> StoreResult<()> {
        self.delete_by_token(token).await.map_err(StoreError::from)
    }

    async fn delete_for_identity(&self, identity_id: Uuid) -> StoreResult<u64> {
        self.delete_by_user(identity_id)
            .await
            .map_err(StoreError::from)
    }
}
