//! OAuth provider verification against a mocked provider HTTP surface.

use mr_auth::{AuthError, AuthProvider, OAuthEndpoints, OAuthProvider, ProviderSettings};
use mr_core::ProviderKind;

use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn settings() -> ProviderSettings {
    ProviderSettings {
        client_id: "client-123".to_string(),
        client_secret: "shhh".to_string(),
        redirect_uri: "http://localhost:5000/auth/google/callback".to_string(),
    }
}

fn provider_against(server: &MockServer, kind: ProviderKind) -> OAuthProvider {
    let endpoints = OAuthEndpoints {
        authorize_url: format!("{}/authorize", server.uri()),
        token_url: format!("{}/token", server.uri()),
        userinfo_url: format!("{}/userinfo", server.uri()),
    };
    OAuthProvider::with_endpoints(kind, settings(), endpoints)
}

#[tokio::test]
async fn given_valid_code_when_verified_then_returns_google_assertion() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/token"))
        .and(body_string_contains("grant_type=authorization_code"))
        .and(body_string_contains("code=code-abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "at-xyz",
            "token_type": "Bearer",
            "expires_in": 3599
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/userinfo"))
        .and(header("authorization", "Bearer at-xyz"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "g-123",
            "email": "a@x.com",
            "name": "kofi",
            "picture": "https://example.com/kofi.png"
        })))
        .mount(&server)
        .await;

    let provider = provider_against(&server, ProviderKind::Google);
    let assertion = provider.verify("code-abc").await.unwrap();

    assert_eq!(assertion.provider, ProviderKind::Google);
    assert_eq!(assertion.provider_user_id, "g-123");
    assert_eq!(assertion.email, "a@x.com");
    assert_eq!(assertion.display_name, "kofi");
    assert_eq!(
        assertion.avatar_url.as_deref(),
        Some("https://example.com/kofi.png")
    );
}

#[tokio::test]
async fn given_graph_profile_without_mail_when_verified_then_falls_back_to_upn() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "at-ms"
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/userinfo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "ms-9",
            "displayName": "Kofi A.",
            "mail": null,
            "userPrincipalName": "kofi@tenant.onmicrosoft.com"
        })))
        .mount(&server)
        .await;

    let provider = provider_against(&server, ProviderKind::Microsoft);
    let assertion = provider.verify("code-abc").await.unwrap();

    assert_eq!(assertion.provider, ProviderKind::Microsoft);
    assert_eq!(assertion.email, "kofi@tenant.onmicrosoft.com");
    assert_eq!(assertion.display_name, "Kofi A.");
}

#[tokio::test]
async fn given_rejected_code_when_verified_then_provider_assertion_invalid() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "invalid_grant"
        })))
        .mount(&server)
        .await;

    let provider = provider_against(&server, ProviderKind::Google);
    let result = provider.verify("stale-code").await;

    assert!(matches!(
        result,
        Err(AuthError::ProviderAssertionInvalid { .. })
    ));
}

#[tokio::test]
async fn given_profile_without_email_when_verified_then_provider_assertion_invalid() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "at-xyz"
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/userinfo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "g-123",
            "name": "kofi"
        })))
        .mount(&server)
        .await;

    let provider = provider_against(&server, ProviderKind::Google);
    let result = provider.verify("code-abc").await;

    assert!(matches!(
        result,
        Err(AuthError::ProviderAssertionInvalid { .. })
    ));
}

#[test]
fn given_provider_when_building_authorize_url_then_carries_state_and_redirect() {
    let provider = OAuthProvider::google(settings());

    let url = provider.authorize_url("state-123");

    assert!(url.starts_with("https://accounts.google.com/o/oauth2/v2/auth?"));
    assert!(url.contains("client_id=client-123"));
    assert!(url.contains("state=state-123"));
    assert!(url.contains("response_type=code"));
    assert!(url.contains(
        "redirect_uri=http%3A%2F%2Flocalhost%3A5000%2Fauth%2Fgoogle%2Fcallback"
    ));
}
