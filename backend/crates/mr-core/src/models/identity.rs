use crate::{AuthAssertion, ProviderKind};

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// A durable user record, independent of which login method created it.
///
/// An identity may carry zero, one, or both provider links (one column per
/// provider enforces at-most-one id per provider) and optionally a password
/// credential. An identity without a password hash cannot log in locally.
#[derive(Debug, Clone, Serialize)]
pub struct Identity {
    pub id: Uuid,
    pub google_id: Option<String>,
    pub microsoft_id: Option<String>,
    pub email: String,
    pub username: String,
    /// PHC-format password hash; `None` for social-only accounts.
    /// Skipped during serialization so it can never leak into a response body.
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    pub profile_picture: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_login: DateTime<Utc>,
}

impl Identity {
    /// New identity seeded from a verified provider assertion.
    pub fn from_assertion(assertion: &AuthAssertion, now: DateTime<Utc>) -> Self {
        let mut identity = Self {
            id: Uuid::new_v4(),
            google_id: None,
            microsoft_id: None,
            email: assertion.email.clone(),
            username: assertion.display_name.clone(),
            password_hash: None,
            profile_picture: assertion.avatar_url.clone(),
            created_at: now,
            last_login: now,
        };
        identity.set_provider_id(assertion.provider, assertion.provider_user_id.clone());
        identity
    }

    /// New identity created through local signup.
    pub fn from_signup(
        email: String,
        username: String,
        password_hash: String,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            google_id: None,
            microsoft_id: None,
            email,
            username,
            password_hash: Some(password_hash),
            profile_picture: None,
            created_at: now,
            last_login: now,
        }
    }

    pub fn provider_id(&self, provider: ProviderKind) -> Option<&str> {
        match provider {
            ProviderKind::Google => self.google_id.as_deref(),
            ProviderKind::Microsoft => self.microsoft_id.as_deref(),
        }
    }

    pub fn set_provider_id(&mut self, provider: ProviderKind, provider_user_id: String) {
        match provider {
            ProviderKind::Google => self.google_id = Some(provider_user_id),
            ProviderKind::Microsoft => self.microsoft_id = Some(provider_user_id),
        }
    }

    pub fn has_password(&self) -> bool {
        self.password_hash.is_some()
    }
}
