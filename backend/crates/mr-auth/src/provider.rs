//! External auth providers behind a single capability interface.
//!
//! The resolver never sees provider specifics; it consumes the
//! `AuthAssertion` a provider produces from a callback code. Endpoint URLs
//! are injectable so tests can stand in a local HTTP mock for the real
//! provider.

use crate::{AuthError, Result as AuthErrorResult};

use mr_core::{AuthAssertion, ProviderKind};

use std::panic::Location;

use error_location::ErrorLocation;
use log::debug;
use serde::Deserialize;

/// A verifiable external login method.
#[async_trait::async_trait]
pub trait AuthProvider: Send + Sync {
    fn kind(&self) -> ProviderKind;

    /// Provider consent-screen URL the browser is redirected to.
    fn authorize_url(&self, state: &str) -> String;

    /// Exchange a callback authorization code for a verified assertion.
    async fn verify(&self, code: &str) -> AuthErrorResult<AuthAssertion>;
}

/// Client credentials and redirect target for one provider registration.
#[derive(Debug, Clone)]
pub struct ProviderSettings {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

/// Authorize / token / userinfo endpoints of an OAuth 2.0 provider.
#[derive(Debug, Clone)]
pub struct OAuthEndpoints {
    pub authorize_url: String,
    pub token_url: String,
    pub userinfo_url: String,
}

impl OAuthEndpoints {
    pub fn google() -> Self {
        Self {
            authorize_url: "https://accounts.google.com/o/oauth2/v2/auth".to_string(),
            token_url: "https://oauth2.googleapis.com/token".to_string(),
            userinfo_url: "https://www.googleapis.com/oauth2/v2/userinfo".to_string(),
        }
    }

    pub fn microsoft() -> Self {
        Self {
            authorize_url: "https://login.microsoftonline.com/common/oauth2/v2.0/authorize"
                .to_string(),
            token_url: "https://login.microsoftonline.com/common/oauth2/v2.0/token".to_string(),
            userinfo_url: "https://graph.microsoft.com/v1.0/me".to_string(),
        }
    }
}

/// Authorization-code-flow provider: code -> access token -> profile.
pub struct OAuthProvider {
    kind: ProviderKind,
    settings: ProviderSettings,
    endpoints: OAuthEndpoints,
    scope: &'static str,
    http: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Union of the profile fields the supported providers return.
#[derive(Debug, Deserialize)]
struct RawProfile {
    id: String,
    email: Option<String>,
    name: Option<String>,
    picture: Option<String>,
    #[serde(rename = "displayName")]
    display_name: Option<String>,
    mail: Option<String>,
    #[serde(rename = "userPrincipalName")]
    user_principal_name: Option<String>,
}

impl OAuthProvider {
    pub fn google(settings: ProviderSettings) -> Self {
        Self::with_endpoints(ProviderKind::Google, settings, OAuthEndpoints::google())
    }

    pub fn microsoft(settings: ProviderSettings) -> Self {
        Self::with_endpoints(
            ProviderKind::Microsoft,
            settings,
            OAuthEndpoints::microsoft(),
        )
    }

    pub fn with_endpoints(
        kind: ProviderKind,
        settings: ProviderSettings,
        endpoints: OAuthEndpoints,
    ) -> Self {
        let scope = match kind {
            ProviderKind::Google => "openid email profile",
            ProviderKind::Microsoft => "openid email profile User.Read",
        };
        Self {
            kind,
            settings,
            endpoints,
            scope,
            http: reqwest::Client::new(),
        }
    }

    #[track_caller]
    fn assertion_invalid<S: Into<String>>(message: S) -> AuthError {
        AuthError::ProviderAssertionInvalid {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

#[async_trait::async_trait]
impl AuthProvider for OAuthProvider {
    fn kind(&self) -> ProviderKind {
        self.kind
    }

    fn authorize_url(&self, state: &str) -> String {
        format!(
            "{}?client_id={}&redirect_uri={}&response_type=code&scope={}&state={}",
            self.endpoints.authorize_url,
            urlencoding::encode(&self.settings.client_id),
            urlencoding::encode(&self.settings.redirect_uri),
            urlencoding::encode(self.scope),
            urlencoding::encode(state),
        )
    }

    async fn verify(&self, code: &str) -> AuthErrorResult<AuthAssertion> {
        let token: TokenResponse = self
            .http
            .post(&self.endpoints.token_url)
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("client_id", self.settings.client_id.as_str()),
                ("client_secret", self.settings.client_secret.as_str()),
                ("redirect_uri", self.settings.redirect_uri.as_str()),
            ])
            .send()
            .await
            .map_err(|e| Self::assertion_invalid(format!("token exchange failed: {e}")))?
            .error_for_status()
            .map_err(|e| Self::assertion_invalid(format!("token exchange rejected: {e}")))?
            .json()
            .await
            .map_err(|e| Self::assertion_invalid(format!("malformed token response: {e}")))?;

        let profile: RawProfile = self
            .http
            .get(&self.endpoints.userinfo_url)
            .bearer_auth(&token.access_token)
            .send()
            .await
            .map_err(|e| Self::assertion_invalid(format!("profile fetch failed: {e}")))?
            .error_for_status()
            .map_err(|e| Self::assertion_invalid(format!("profile fetch rejected: {e}")))?
            .json()
            .await
            .map_err(|e| Self::assertion_invalid(format!("malformed profile: {e}")))?;

        debug!("verified {} assertion for provider user", self.kind);

        let (email, display_name, avatar_url) = match self.kind {
            ProviderKind::Google => (profile.email, profile.name, profile.picture),
            // Graph reports the address under `mail` for most accounts and
            // only under `userPrincipalName` for some tenants.
            ProviderKind::Microsoft => (
                profile.mail.or(profile.user_principal_name),
                profile.display_name,
                None,
            ),
        };

        let email = email.ok_or_else(|| Self::assertion_invalid("profile has no email"))?;
        let display_name = display_name.unwrap_or_else(|| email.clone());

        Ok(AuthAssertion {
            provider: self.kind,
            provider_user_id: profile.id,
            email,
            display_name,
            avatar_url,
        })
    }
}
