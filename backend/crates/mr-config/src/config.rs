use crate::{
    AuthConfig, ConfigError, ConfigErrorResult, DatabaseConfig, LoggingConfig, RateLimitConfig,
    ServerConfig, SessionConfig,
};

use std::path::PathBuf;

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub session: SessionConfig,
    pub rate_limit: RateLimitConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load config with full production error handling.
    ///
    /// Loading order:
    /// 1. Check for MR_CONFIG_DIR env var, else use ./.mr/
    /// 2. Auto-create config directory if it doesn't exist
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply MR_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join("config.toml");

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    fn load_toml(path: &PathBuf) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.clone(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.clone(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: MR_CONFIG_DIR env var > ./.mr/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var("MR_CONFIG_DIR") {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(".mr"))
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.server.validate()?;
        self.auth.validate()?;
        self.session.validate()?;
        self.rate_limit.validate()?;

        // Validate database path doesn't escape config dir
        let db_path = std::path::Path::new(&self.database.path);
        if db_path.is_absolute() || self.database.path.contains("..") {
            return Err(ConfigError::database(
                "database.path must be relative and cannot contain '..'",
            ));
        }

        Ok(())
    }

    /// Get absolute path to database file.
    pub fn database_path(&self) -> ConfigErrorResult<PathBuf> {
        let config_dir = Self::config_dir()?;
        Ok(config_dir.join(&self.database.path))
    }

    /// Get bind address as string.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Log configuration summary (NEVER logs secrets).
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!("  server: {}:{}", self.server.host, self.server.port);
        info!("  allowed_origins: {}", self.server.allowed_origins.join(", "));
        info!("  database: {}", self.database.path);
        info!(
            "  providers: google={}, microsoft={}",
            self.auth.google().is_some(),
            self.auth.microsoft().is_some()
        );
        info!("  frontend_url: {}", self.auth.frontend_url);
        info!(
            "  session: cookie={}, ttl={}d, {} ({})",
            self.session.cookie_name,
            self.session.ttl_days,
            if self.session.cross_site {
                "cross-site"
            } else {
                "same-site"
            },
            if self.session.secure {
                "secure"
            } else {
                "insecure"
            },
        );
        info!(
            "  rate_limit: {}/{}s",
            self.rate_limit.max_attempts, self.rate_limit.window_secs
        );
        info!(
            "  logging: {} (colored: {})",
            *self.logging.level, self.logging.colored
        );
    }

    fn apply_env_overrides(&mut self) {
        // Server
        Self::apply_env_string("MR_SERVER_HOST", &mut self.server.host);
        Self::apply_env_parse("MR_SERVER_PORT", &mut self.server.port);
        if let Ok(origins) = std::env::var("MR_ALLOWED_ORIGINS") {
            self.server.allowed_origins = origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        // Database
        Self::apply_env_string("MR_DATABASE_PATH", &mut self.database.path);

        // Auth
        Self::apply_env_string("MR_FRONTEND_URL", &mut self.auth.frontend_url);
        Self::apply_env_option_string("MR_GOOGLE_CLIENT_ID", &mut self.auth.google_client_id);
        Self::apply_env_option_string(
            "MR_GOOGLE_CLIENT_SECRET",
            &mut self.auth.google_client_secret,
        );
        Self::apply_env_option_string("MR_GOOGLE_CALLBACK_URL", &mut self.auth.google_callback_url);
        Self::apply_env_option_string("MR_MICROSOFT_CLIENT_ID", &mut self.auth.microsoft_client_id);
        Self::apply_env_option_string(
            "MR_MICROSOFT_CLIENT_SECRET",
            &mut self.auth.microsoft_client_secret,
        );
        Self::apply_env_option_string(
            "MR_MICROSOFT_CALLBACK_URL",
            &mut self.auth.microsoft_callback_url,
        );

        // Session
        Self::apply_env_string("MR_SESSION_COOKIE_NAME", &mut self.session.cookie_name);
        Self::apply_env_parse("MR_SESSION_TTL_DAYS", &mut self.session.ttl_days);
        Self::apply_env_bool("MR_SESSION_CROSS_SITE", &mut self.session.cross_site);
        Self::apply_env_bool("MR_SESSION_SECURE", &mut self.session.secure);

        // Rate limit
        Self::apply_env_parse("MR_RATE_LIMIT_MAX_ATTEMPTS", &mut self.rate_limit.max_attempts);
        Self::apply_env_parse("MR_RATE_LIMIT_WINDOW_SECS", &mut self.rate_limit.window_secs);

        // Logging
        Self::apply_env_parse("MR_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("MR_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("MR_LOG_FILE", &mut self.logging.file);
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}
