//! Session cookie policy and header plumbing.
//!
//! Two deployment topologies are supported and selected by configuration:
//! same-site (frontend and API share a site, `SameSite=Lax`) and cross-site
//! (split origins, `SameSite=None; Secure`). One policy object drives every
//! cookie the server issues so the attributes cannot drift between routes.

use http::HeaderMap;
use http::header::COOKIE;

pub const STATE_COOKIE_MAX_AGE_SECS: i64 = 600;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SameSitePolicy {
    Lax,
    None,
}

impl SameSitePolicy {
    fn as_str(&self) -> &'static str {
        match self {
            SameSitePolicy::Lax => "Lax",
            SameSitePolicy::None => "None",
        }
    }
}

#[derive(Debug, Clone)]
pub struct CookiePolicy {
    /// Session token cookie name; stable across deployments.
    pub session_name: String,
    /// Non-authoritative user-info cookie, readable by frontend code.
    pub user_info_name: String,
    /// CSRF state cookie used during the OAuth round trip.
    pub oauth_state_name: String,
    pub secure: bool,
    pub same_site: SameSitePolicy,
    pub max_age_secs: i64,
}

impl CookiePolicy {
    /// HttpOnly session token cookie.
    pub fn session_cookie(&self, token: &str) -> String {
        self.build(&self.session_name, token, true, self.max_age_secs)
    }

    /// User-info cookie: URL-encoded JSON the frontend may read to render
    /// identity-dependent UI without a round trip. Never HttpOnly, never
    /// trusted by the server.
    pub fn user_info_cookie(&self, json: &str) -> String {
        let encoded = urlencoding::encode(json).into_owned();
        self.build(&self.user_info_name, &encoded, false, self.max_age_secs)
    }

    /// Short-lived CSRF state cookie for the OAuth callback.
    pub fn oauth_state_cookie(&self, state: &str) -> String {
        self.build(&self.oauth_state_name, state, true, STATE_COOKIE_MAX_AGE_SECS)
    }

    /// Expire a cookie immediately.
    pub fn clear_cookie(&self, name: &str) -> String {
        self.build(name, "", true, 0)
    }

    fn build(&self, name: &str, value: &str, http_only: bool, max_age_secs: i64) -> String {
        let mut cookie = format!(
            "{}={}; Path=/; Max-Age={}; SameSite={}",
            name,
            value,
            max_age_secs,
            self.same_site.as_str()
        );
        if http_only {
            cookie.push_str("; HttpOnly");
        }
        // SameSite=None is only honored by browsers alongside Secure.
        if self.secure || self.same_site == SameSitePolicy::None {
            cookie.push_str("; Secure");
        }
        cookie
    }
}

/// Extract a cookie value from request headers.
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    let raw = headers.get(COOKIE)?.to_str().ok()?;
    for pair in raw.split(';') {
        let pair = pair.trim();
        if let Some((k, v)) = pair.split_once('=')
            && k == name
            && !v.is_empty()
        {
            return Some(v.to_string());
        }
    }
    None
}
