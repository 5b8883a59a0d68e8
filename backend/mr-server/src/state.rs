use mr_auth::{
    AuthProvider, CookiePolicy, IdentityResolver, LoginRateLimiter, OAuthProvider,
    ProviderSettings, RateLimitConfig, SameSitePolicy, SessionManager,
};
use mr_config::Config;
use mr_core::ProviderKind;
use mr_db::{IdentityRepository, SessionRepository};

use std::sync::Arc;

use sqlx::SqlitePool;

/// Explicitly constructed application state: the pool, the auth core wired
/// over its SQL-backed stores, the registered providers, and the cookie
/// policy. Passed to every handler; nothing here is ambient.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub resolver: Arc<IdentityResolver>,
    pub sessions: Arc<SessionManager>,
    pub providers: Arc<Vec<Arc<dyn AuthProvider>>>,
    pub cookies: CookiePolicy,
    pub login_limiter: Arc<LoginRateLimiter>,
    pub frontend_url: String,
    pub allowed_origins: Vec<String>,
}

impl AppState {
    pub fn from_config(config: &Config, pool: SqlitePool) -> Self {
        let identity_store = Arc::new(IdentityRepository::new(pool.clone()));
        let session_store = Arc::new(SessionRepository::new(pool.clone()));

        let mut providers: Vec<Arc<dyn AuthProvider>> = Vec::new();
        if let Some(creds) = config.auth.google() {
            providers.push(Arc::new(OAuthProvider::google(ProviderSettings {
                client_id: creds.client_id,
                client_secret: creds.client_secret,
                redirect_uri: creds.callback_url,
            })));
        }
        if let Some(creds) = config.auth.microsoft() {
            providers.push(Arc::new(OAuthProvider::microsoft(ProviderSettings {
                client_id: creds.client_id,
                client_secret: creds.client_secret,
                redirect_uri: creds.callback_url,
            })));
        }

        let cookies = CookiePolicy {
            session_name: config.session.cookie_name.clone(),
            user_info_name: config.session.user_info_cookie_name.clone(),
            oauth_state_name: config.session.oauth_state_cookie_name.clone(),
            secure: config.session.secure,
            same_site: if config.session.cross_site {
                SameSitePolicy::None
            } else {
                SameSitePolicy::Lax
            },
            max_age_secs: config.session.max_age_secs(),
        };

        Self {
            pool,
            resolver: Arc::new(IdentityResolver::new(identity_store)),
            sessions: Arc::new(SessionManager::new(
                session_store,
                chrono::Duration::days(i64::from(config.session.ttl_days)),
            )),
            providers: Arc::new(providers),
            cookies,
            login_limiter: Arc::new(LoginRateLimiter::new(RateLimitConfig {
                max_attempts: config.rate_limit.max_attempts,
                window_secs: config.rate_limit.window_secs,
            })),
            frontend_url: config.auth.frontend_url.clone(),
            allowed_origins: config.server.allowed_origins.clone(),
        }
    }

    pub fn provider(&self, kind: ProviderKind) -> Option<Arc<dyn AuthProvider>> {
        self.providers.iter().find(|p| p.kind() == kind).cloned()
    }
}
