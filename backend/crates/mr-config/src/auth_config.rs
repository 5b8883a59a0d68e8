use crate::{ConfigError, ConfigErrorResult, DEFAULT_FRONTEND_URL};

use serde::Deserialize;

/// One provider registration. All three fields are required for the
/// provider's routes to be mounted.
#[derive(Debug, Clone)]
pub struct ProviderCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub callback_url: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Where successful logins and failed callbacks send the browser.
    pub frontend_url: String,

    pub google_client_id: Option<String>,
    pub google_client_secret: Option<String>,
    pub google_callback_url: Option<String>,

    pub microsoft_client_id: Option<String>,
    pub microsoft_client_secret: Option<String>,
    pub microsoft_callback_url: Option<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            frontend_url: String::from(DEFAULT_FRONTEND_URL),
            google_client_id: None,
            google_client_secret: None,
            google_callback_url: None,
            microsoft_client_id: None,
            microsoft_client_secret: None,
            microsoft_callback_url: None,
        }
    }
}

impl AuthConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.frontend_url.is_empty() {
            return Err(ConfigError::auth("auth.frontend_url must not be empty"));
        }

        Self::check_complete(
            "google",
            &self.google_client_id,
            &self.google_client_secret,
            &self.google_callback_url,
        )?;
        Self::check_complete(
            "microsoft",
            &self.microsoft_client_id,
            &self.microsoft_client_secret,
            &self.microsoft_callback_url,
        )?;

        Ok(())
    }

    pub fn google(&self) -> Option<ProviderCredentials> {
        Self::credentials(
            &self.google_client_id,
            &self.google_client_secret,
            &self.google_callback_url,
        )
    }

    pub fn microsoft(&self) -> Option<ProviderCredentials> {
        Self::credentials(
            &self.microsoft_client_id,
            &self.microsoft_client_secret,
            &self.microsoft_callback_url,
        )
    }

    fn credentials(
        id: &Option<String>,
        secret: &Option<String>,
        callback: &Option<String>,
    ) -> Option<ProviderCredentials> {
        match (id, secret, callback) {
            (Some(client_id), Some(client_secret), Some(callback_url)) => {
                Some(ProviderCredentials {
                    client_id: client_id.clone(),
                    client_secret: client_secret.clone(),
                    callback_url: callback_url.clone(),
                })
            }
            _ => None,
        }
    }

    /// A half-configured provider is a deployment mistake; fail at startup
    /// instead of mounting a broken login route.
    fn check_complete(
        name: &str,
        id: &Option<String>,
        secret: &Option<String>,
        callback: &Option<String>,
    ) -> ConfigErrorResult<()> {
        let set = [id.is_some(), secret.is_some(), callback.is_some()];
        let count = set.iter().filter(|s| **s).count();
        if count != 0 && count != 3 {
            return Err(ConfigError::auth(format!(
                "auth.{name}_client_id, auth.{name}_client_secret, and auth.{name}_callback_url must be set together"
            )));
        }
        Ok(())
    }
}
