//! SQL-backed credential store.
//!
//! All mutation is single-row and constraint-checked; the UNIQUE indexes on
//! email and the provider id columns decide races, never a read-modify-write.

use crate::row::{timestamp_column, uuid_column};
use crate::Result as DbErrorResult;

use mr_auth::store::{IdentityStore, StoreError, StoreResult};
use mr_core::{Identity, ProviderKind};

use chrono::{DateTime, Utc};
use sqlx::Row;
use sqlx::SqlitePool;
use sqlx::sqlite::SqliteRow;
use uuid::Uuid;

const IDENTITY_COLUMNS: &str = "id, google_id, microsoft_id, email, username, \
     password_hash, profile_picture, created_at, last_login";

pub struct IdentityRepository {
    pool: SqlitePool,
}

impl IdentityRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn map_row(row: &SqliteRow) -> DbErrorResult<Identity> {
        Ok(Identity {
            id: uuid_column(row, "id")?,
            google_id: row.try_get("google_id")?,
            microsoft_id: row.try_get("microsoft_id")?,
            email: row.try_get("email")?,
            username: row.try_get("username")?,
            password_hash: row.try_get("password_hash")?,
            profile_picture: row.try_get("profile_picture")?,
            created_at: timestamp_column(row, "created_at")?,
            last_login: timestamp_column(row, "last_login")?,
        })
    }

    async fn fetch_one_by(&self, sql: &str, value: &str) -> DbErrorResult<Option<Identity>> {
        let row = sqlx::query(sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(Self::map_row).transpose()
    }

    pub async fn find(&self, id: Uuid) -> DbErrorResult<Option<Identity>> {
        let sql = format!("SELECT {} FROM users WHERE id = ?", IDENTITY_COLUMNS);
        self.fetch_one_by(&sql, &id.to_string()).await
    }

    pub async fn find_by_provider(
        &self,
        provider: ProviderKind,
        provider_user_id: &str,
    ) -> DbErrorResult<Option<Identity>> {
        let sql = format!(
            "SELECT {} FROM users WHERE {} = ?",
            IDENTITY_COLUMNS,
            provider_column(provider)
        );
        self.fetch_one_by(&sql, provider_user_id).await
    }

    pub async fn find_by_email_address(&self, email: &str) -> DbErrorResult<Option<Identity>> {
        let sql = format!(
            "SELECT {} FROM users WHERE LOWER(email) = LOWER(?)",
            IDENTITY_COLUMNS
        );
        self.fetch_one_by(&sql, email).await
    }

    pub async fn find_by_identifier(&self, identifier: &str) -> DbErrorResult<Option<Identity>> {
        let sql = format!(
            "SELECT {} FROM users WHERE LOWER(email) = LOWER(?) OR username = ?",
            IDENTITY_COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(identifier)
            .bind(identifier)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(Self::map_row).transpose()
    }

    pub async fn insert(&self, identity: &Identity) -> DbErrorResult<()> {
        sqlx::query(
            r#"
                INSERT INTO users (
                    id, google_id, microsoft_id, email, username,
                    password_hash, profile_picture, created_at, last_login
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(identity.id.to_string())
        .bind(&identity.google_id)
        .bind(&identity.microsoft_id)
        .bind(&identity.email)
        .bind(&identity.username)
        .bind(&identity.password_hash)
        .bind(&identity.profile_picture)
        .bind(identity.created_at.timestamp())
        .bind(identity.last_login.timestamp())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn set_provider_id(
        &self,
        id: Uuid,
        provider: ProviderKind,
        provider_user_id: &str,
    ) -> DbErrorResult<()> {
        let sql = format!(
            "UPDATE users SET {} = ? WHERE id = ?",
            provider_column(provider)
        );
        sqlx::query(&sql)
            .bind(provider_user_id)
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn set_password(
        &self,
        id: Uuid,
        username: &str,
        password_hash: &str,
    ) -> DbErrorResult<()> {
        sqlx::query("UPDATE users SET username = ?, password_hash = ? WHERE id = ?")
            .bind(username)
            .bind(password_hash)
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn set_last_login(&self, id: Uuid, at: DateTime<Utc>) -> DbErrorResult<()> {
        sqlx::query("UPDATE users SET last_login = ? WHERE id = ?")
            .bind(at.timestamp())
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

fn provider_column(provider: ProviderKind) -> &'static str {
    match provider {
        ProviderKind::Google => "google_id",
        ProviderKind::Microsoft => "microsoft_id",
    }
}

#[async_trait::async_trait]
impl IdentityStore for IdentityRepository {
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Identity>> {
        self.find(id).await.map_err(StoreError::from)
    }

    async fn find_by_provider_id(
        &self,
        provider: ProviderKind,
        provider_user_id: &str,
    ) -> StoreResult<Option<Identity>> {
        self
            .find_by_provider(provider, provider_user_id)
            .await
            .map_err(StoreError::from)
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<Identity>> {
        self
            .find_by_email_address(email)
            .await
            .map_err(StoreError::from)
    }

    async fn find_by_email_or_username(&self, identifier: &str) -> StoreResult<Option<Identity>> {
        self
            .find_by_identifier(identifier)
            .await
            .map_err(StoreError::from)
    }

    async fn create(&self, identity: &Identity) -> StoreResult<()> {
        self.insert(identity).await.map_err(StoreError::from)
    }

    async fn link_provider(
        &self,
        id: Uuid,
        provider: ProviderKind,
        provider_user_id: &str,
    ) -> StoreResult<()> {
        self
            .set_provider_id(id, provider, provider_user_id)
            .await
            .map_err(StoreError::from)
    }

    async fn attach_password(
        &self,
        id: Uuid,
        username: &str,
        password_hash: &str,
    ) -> StoreResult<()> {
        self
            .set_password(id, username, password_hash)
            .await
            .map_err(StoreError::from)
    }

    async fn touch_last_login(&self, id: Uuid, at: DateTime<Utc>) -> StoreResult<()> {
        self.set_last_login(id, at).await.map_err(StoreError::from)
    }
}
