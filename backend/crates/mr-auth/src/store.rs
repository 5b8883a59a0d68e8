//! Capability interfaces over the credential and session stores.
//!
//! The resolver and session manager depend only on these traits, so the auth
//! core can be exercised with in-memory fakes and the SQL-backed
//! implementations live with the rest of the database code.

use mr_core::{Identity, ProviderKind, Session};

use chrono::{DateTime, Utc};
use error_location::ErrorLocation;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum StoreError {
    /// The store rejected a write because a uniqueness constraint already
    /// holds the value. The constraint is the authoritative tie-breaker for
    /// racing writes; callers re-read and decide.
    #[error("Unique constraint violation: {message} {location}")]
    UniqueViolation {
        message: String,
        location: ErrorLocation,
    },

    /// Connectivity or query fault. Fatal to the current request.
    #[error("Store unavailable: {message} {location}")]
    Unavailable {
        message: String,
        location: ErrorLocation,
    },
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Persistent identity records keyed by provider id, email, or username.
#[async_trait::async_trait]
pub trait IdentityStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Identity>>;

    async fn find_by_provider_id(
        &self,
        provider: ProviderKind,
        provider_user_id: &str,
    ) -> StoreResult<Option<Identity>>;

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<Identity>>;

    /// Local-login lookup: the identifier may be an email or a username.
    async fn find_by_email_or_username(&self, identifier: &str) -> StoreResult<Option<Identity>>;

    async fn create(&self, identity: &Identity) -> StoreResult<()>;

    /// Attach a provider id to an existing identity (account linking).
    async fn link_provider(
        &self,
        id: Uuid,
        provider: ProviderKind,
        provider_user_id: &str,
    ) -> StoreResult<()>;

    /// Attach a password credential to an existing identity (account
    /// conversion for social-only records).
    async fn attach_password(
        &self,
        id: Uuid,
        username: &str,
        password_hash: &str,
    ) -> StoreResult<()>;

    async fn touch_last_login(&self, id: Uuid, at: DateTime<Utc>) -> StoreResult<()>;
}

/// Session bindings, token -> identity.
#[async_trait::async_trait]
pub trait SessionStore: Send + Sync {
    async fn insert(&self, session: &Session) -> StoreResult<()>;

    async fn get(&self, token: &str) -> StoreResult<Option<Session>>;

    /// Must succeed for unknown tokens too (idempotent destroy).
    async fn delete(&self, token: &str) -> StoreResult<()>;

    /// Administrative revocation of every session held by one identity.
    /// Returns the number of bindings removed.
    async fn delete_for_identity(&self, identity_id: Uuid) -> StoreResult<u64>;
}
