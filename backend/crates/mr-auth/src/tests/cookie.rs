use crate::cookie::{CookiePolicy, SameSitePolicy, cookie_value};

use http::HeaderMap;
use http::header::COOKIE;

fn lax_policy() -> CookiePolicy {
    CookiePolicy {
        session_name: "music_roadmap_session".to_string(),
        user_info_name: "user_info".to_string(),
        oauth_state_name: "oauth_state".to_string(),
        secure: false,
        same_site: SameSitePolicy::Lax,
        max_age_secs: 30 * 24 * 60 * 60,
    }
}

#[test]
fn given_same_site_policy_when_building_session_cookie_then_lax_and_http_only() {
    let cookie = lax_policy().session_cookie("tok123");

    assert!(cookie.starts_with("music_roadmap_session=tok123; "));
    assert!(cookie.contains("SameSite=Lax"));
    assert!(cookie.contains("HttpOnly"));
    assert!(!cookie.contains("Secure"));
}

#[test]
fn given_cross_site_policy_when_building_session_cookie_then_none_forces_secure() {
    let policy = CookiePolicy {
        same_site: SameSitePolicy::None,
        secure: false,
        ..lax_policy()
    };

    let cookie = policy.session_cookie("tok123");

    assert!(cookie.contains("SameSite=None"));
    assert!(cookie.contains("Secure"));
}

#[test]
fn given_user_info_cookie_then_readable_by_scripts_and_url_encoded() {
    let cookie = lax_policy().user_info_cookie(r#"{"username":"kofi"}"#);

    assert!(!cookie.contains("HttpOnly"));
    assert!(!cookie.contains('"'));
    assert!(cookie.contains("%22username%22"));
}

#[test]
fn given_clear_cookie_then_max_age_zero() {
    let cookie = lax_policy().clear_cookie("music_roadmap_session");

    assert!(cookie.starts_with("music_roadmap_session=; "));
    assert!(cookie.contains("Max-Age=0"));
}

#[test]
fn given_cookie_header_when_extracting_then_finds_named_value() {
    let mut headers = HeaderMap::new();
    headers.insert(
        COOKIE,
        "user_info=abc; music_roadmap_session=tok123; other=1"
            .parse()
            .unwrap(),
    );

    assert_eq!(
        cookie_value(&headers, "music_roadmap_session").as_deref(),
        Some("tok123")
    );
    assert_eq!(cookie_value(&headers, "missing"), None);
}

#[test]
fn given_cleared_cookie_in_header_when_extracting_then_empty_is_absent() {
    let mut headers = HeaderMap::new();
    headers.insert(COOKIE, "music_roadmap_session=".parse().unwrap());

    assert_eq!(cookie_value(&headers, "music_roadmap_session"), None);
}
