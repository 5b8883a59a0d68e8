//! Maps verified assertions and local credentials onto identity records.
//!
//! Existence checks here are advisory only: concurrent logins and signups can
//! race past them, and the store's uniqueness constraints are the
//! authoritative tie-breaker. Losers of a create race re-read and either link
//! onto the winner (OAuth path) or surface `EmailTaken` (signup path).

use crate::password::{hash_password, verify_password};
use crate::store::{IdentityStore, StoreError};
use crate::{AuthError, Result as AuthErrorResult};

use mr_core::{AuthAssertion, Identity};

use std::panic::Location;
use std::sync::Arc;

use chrono::Utc;
use error_location::ErrorLocation;
use log::{debug, info};

pub struct IdentityResolver {
    store: Arc<dyn IdentityStore>,
}

impl IdentityResolver {
    pub fn new(store: Arc<dyn IdentityStore>) -> Self {
        Self { store }
    }

    /// Resolve an OAuth assertion to an identity, creating or linking as
    /// needed.
    ///
    /// Linking is keyed on the provider-asserted email without independent
    /// re-verification. This trusts the provider's email claim: a provider
    /// asserting an email it does not control could merge into an existing
    /// account. Deliberate, inherited behavior; do not silently tighten.
    pub async fn resolve_oauth(&self, assertion: AuthAssertion) -> AuthErrorResult<Identity> {
        let now = Utc::now();

        // Already linked: the common path.
        if let Some(identity) = self
            .store
            .find_by_provider_id(assertion.provider, &assertion.provider_user_id)
            .await?
        {
            self.store.touch_last_login(identity.id, now).await?;
            return Ok(Identity {
                last_login: now,
                ..identity
            });
        }

        // Known email, new provider: link the provider id onto that record.
        if let Some(identity) = self.store.find_by_email(&assertion.email).await? {
            return self.link_onto(identity, &assertion).await;
        }

        // Unseen email: create, falling back to link when a concurrent
        // callback won the insert race.
        let identity = Identity::from_assertion(&assertion, now);
        match self.store.create(&identity).await {
            Ok(()) => {
                info!(
                    "created identity {} via {}",
                    identity.id, assertion.provider
                );
                Ok(identity)
            }
            Err(StoreError::UniqueViolation { .. }) => {
                debug!("create race on {}, re-reading", assertion.provider);
                let winner = self
                    .store
                    .find_by_email(&assertion.email)
                    .await?
                    .ok_or_else(|| StoreError::Unavailable {
                        message: "identity vanished after unique violation".to_string(),
                        location: ErrorLocation::from(Location::caller()),
                    })?;
                self.link_onto(winner, &assertion).await
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn link_onto(
        &self,
        mut identity: Identity,
        assertion: &AuthAssertion,
    ) -> AuthErrorResult<Identity> {
        let now = Utc::now();

        if identity.provider_id(assertion.provider).is_none() {
            match self
                .store
                .link_provider(identity.id, assertion.provider, &assertion.provider_user_id)
                .await
            {
                Ok(()) => {
                    info!(
                        "linked {} id onto identity {}",
                        assertion.provider, identity.id
                    );
                    identity
                        .set_provider_id(assertion.provider, assertion.provider_user_id.clone());
                }
                // A concurrent callback linked this provider id first; the
                // constraint on the provider column decides, re-read it.
                Err(StoreError::UniqueViolation { .. }) => {
                    identity = self
                        .store
                        .find_by_provider_id(assertion.provider, &assertion.provider_user_id)
                        .await?
                        .ok_or_else(|| StoreError::Unavailable {
                            message: "identity vanished after link race".to_string(),
                            location: ErrorLocation::from(Location::caller()),
                        })?;
                }
                Err(e) => return Err(e.into()),
            }
        }

        self.store.touch_last_login(identity.id, now).await?;
        identity.last_login = now;
        Ok(identity)
    }

    /// Local username/password login.
    ///
    /// Unknown identifier and wrong password both yield `InvalidCredentials`
    /// so the response cannot be used to probe for accounts.
    pub async fn login_local(
        &self,
        identifier: &str,
        password: &str,
    ) -> AuthErrorResult<Identity> {
        let Some(identity) = self.store.find_by_email_or_username(identifier).await? else {
            return Err(AuthError::InvalidCredentials {
                location: ErrorLocation::from(Location::caller()),
            });
        };

        let Some(hash) = identity.password_hash.as_deref() else {
            return Err(AuthError::AccountHasNoPassword {
                location: ErrorLocation::from(Location::caller()),
            });
        };

        if !verify_password(hash, password) {
            return Err(AuthError::InvalidCredentials {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let now = Utc::now();
        self.store.touch_last_login(identity.id, now).await?;
        Ok(Identity {
            last_login: now,
            ..identity
        })
    }

    /// Local signup.
    ///
    /// A passworded identity under this email is a conflict. A social-only
    /// identity under this email gets the password attached instead of an
    /// error: that converts the account to dual-credential, by policy.
    pub async fn signup_local(
        &self,
        email: &str,
        username: &str,
        password: &str,
    ) -> AuthErrorResult<Identity> {
        let password_hash = hash_password(password)?;
        let now = Utc::now();

        match self.store.find_by_email(email).await? {
            Some(existing) if existing.has_password() => Err(AuthError::EmailTaken {
                location: ErrorLocation::from(Location::caller()),
            }),
            Some(existing) => {
                self.store
                    .attach_password(existing.id, username, &password_hash)
                    .await?;
                self.store.touch_last_login(existing.id, now).await?;
                info!("converted social-only identity {} to local", existing.id);
                Ok(Identity {
                    username: username.to_string(),
                    password_hash: Some(password_hash),
                    last_login: now,
                    ..existing
                })
            }
            None => {
                let identity = Identity::from_signup(
                    email.to_string(),
                    username.to_string(),
                    password_hash,
                    now,
                );
                match self.store.create(&identity).await {
                    Ok(()) => {
                        info!("created local identity {}", identity.id);
                        Ok(identity)
                    }
                    // Lost a signup race on the email constraint.
                    Err(StoreError::UniqueViolation { .. }) => Err(AuthError::EmailTaken {
                        location: ErrorLocation::from(Location::caller()),
                    }),
                    Err(e) => Err(e.into()),
                }
            }
        }
    }

    /// Minimal public-field fetch used by the per-request authorization gate.
    pub async fn identity_by_id(&self, id: uuid::Uuid) -> AuthErrorResult<Option<Identity>> {
        Ok(self.store.find_by_id(id).await?)
    }
}
