mod auth_config;
mod config;
mod database_config;
mod error;
mod log_level;
mod logging_config;
mod rate_limit_config;
mod server_config;
mod session_config;

pub use auth_config::{AuthConfig, ProviderCredentials};
pub use config::Config;
pub use database_config::DatabaseConfig;
pub use error::{ConfigError, ConfigErrorResult};
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use rate_limit_config::RateLimitConfig;
pub use server_config::ServerConfig;
pub use session_config::SessionConfig;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_ALLOWED_ORIGINS: &[&str] = &["http://localhost:3001", "http://localhost:5173"];
const DEFAULT_DATABASE_FILENAME: &str = "data.db";
const DEFAULT_FRONTEND_URL: &str = "http://localhost:3001";
const DEFAULT_SESSION_COOKIE: &str = "music_roadmap_session";
const DEFAULT_USER_INFO_COOKIE: &str = "user_info";
const DEFAULT_OAUTH_STATE_COOKIE: &str = "oauth_state";
const DEFAULT_SESSION_TTL_DAYS: u32 = 30;
const DEFAULT_RATE_LIMIT_ATTEMPTS: u32 = 10;
const DEFAULT_RATE_LIMIT_WINDOW_SECS: u64 = 60;
const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "log";
const MIN_PORT: u16 = 1024;

#[cfg(test)]
mod tests;
