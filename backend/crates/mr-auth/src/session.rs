//! Session issuance, validation, and destruction over an injected store.

use crate::store::{SessionStore, StoreResult};
use crate::token::generate_token;

use mr_core::Session;

use std::sync::Arc;

use chrono::{Duration, Utc};
use log::{debug, info};
use uuid::Uuid;

pub struct SessionManager {
    store: Arc<dyn SessionStore>,
    ttl: Duration,
}

impl SessionManager {
    pub fn new(store: Arc<dyn SessionStore>, ttl: Duration) -> Self {
        Self { store, ttl }
    }

    /// Issue a fresh session bound to one identity.
    pub async fn create(&self, identity_id: Uuid) -> StoreResult<Session> {
        let now = Utc::now();
        let session = Session {
            token: generate_token(),
            identity_id,
            created_at: now,
            expires_at: now + self.ttl,
        };
        self.store.insert(&session).await?;
        info!(
            "session created for {} (ttl {}s)",
            identity_id,
            self.ttl.num_seconds()
        );
        Ok(session)
    }

    /// Resolve a token to its identity id.
    ///
    /// Absent, unknown, or expired tokens resolve to `None`; this never
    /// errors for a bad token. Expired rows are dropped lazily here.
    pub async fn validate(&self, token: &str) -> StoreResult<Option<Uuid>> {
        let Some(session) = self.store.get(token).await? else {
            return Ok(None);
        };

        if session.is_expired(Utc::now()) {
            debug!("session expired for {}", session.identity_id);
            self.store.delete(token).await?;
            return Ok(None);
        }

        Ok(Some(session.identity_id))
    }

    /// Remove a session binding. Destroying an already-invalid token is fine.
    pub async fn destroy(&self, token: &str) -> StoreResult<()> {
        self.store.delete(token).await
    }

    /// Remove every session held by one identity.
    pub async fn revoke_identity(&self, identity_id: Uuid) -> StoreResult<u64> {
        let removed = self.store.delete_for_identity(identity_id).await?;
        info!("revoked {} session(s) for {}", removed, identity_id);
        Ok(removed)
    }
}
