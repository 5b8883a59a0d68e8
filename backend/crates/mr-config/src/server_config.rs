use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_ALLOWED_ORIGINS, DEFAULT_HOST, DEFAULT_PORT, MIN_PORT,
};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Origins allowed by CORS. Credentials are always allowed, so this must
    /// stay an explicit list, never a wildcard.
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from(DEFAULT_HOST),
            port: DEFAULT_PORT,
            allowed_origins: DEFAULT_ALLOWED_ORIGINS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        // Port 0 means "auto-assign" - OS picks an available port.
        if self.port != 0 && self.port < MIN_PORT {
            return Err(ConfigError::server(format!(
                "server.port must be 0 (auto) or >= {}, got {}",
                MIN_PORT, self.port
            )));
        }

        for origin in &self.allowed_origins {
            if !origin.starts_with("http://") && !origin.starts_with("https://") {
                return Err(ConfigError::server(format!(
                    "server.allowed_origins entries must be http(s) origins, got '{}'",
                    origin
                )));
            }
            if origin.ends_with('/') {
                return Err(ConfigError::server(format!(
                    "server.allowed_origins entries must not end with '/', got '{}'",
                    origin
                )));
            }
        }

        Ok(())
    }
}
