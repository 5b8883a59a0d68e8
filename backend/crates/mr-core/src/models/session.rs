use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A time-bounded authorization grant bound to exactly one identity.
///
/// Lookup is one-directional: token to identity. Identities never enumerate
/// their sessions outside administrative revocation.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub identity_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}
