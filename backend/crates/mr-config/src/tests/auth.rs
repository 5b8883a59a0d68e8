use crate::AuthConfig;

use googletest::prelude::*;

#[test]
fn given_no_provider_credentials_then_valid_and_unmounted() {
    let config = AuthConfig::default();

    assert_that!(config.validate(), ok(anything()));
    assert_that!(config.google(), none());
    assert_that!(config.microsoft(), none());
}

#[test]
fn given_complete_provider_credentials_then_provider_available() {
    let config = AuthConfig {
        google_client_id: Some("id".into()),
        google_client_secret: Some("secret".into()),
        google_callback_url: Some("http://localhost:5000/auth/google/callback".into()),
        ..AuthConfig::default()
    };

    assert_that!(config.validate(), ok(anything()));
    let creds = config.google().unwrap();
    assert_that!(creds.client_id, eq("id"));
}

#[test]
fn given_partial_provider_credentials_then_validation_fails() {
    let config = AuthConfig {
        google_client_id: Some("id".into()),
        ..AuthConfig::default()
    };

    assert_that!(config.validate(), err(anything()));
}
