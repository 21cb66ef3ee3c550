//! Token cache behavior against a mock token endpoint.

mod common;

use std::fs;

use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, ResponseTemplate};

use common::{write_token_file, MockDirectoryServer};
use qsync_connector_google::{GoogleCredentials, GoogleError, StoredToken, TokenCache};

fn test_credentials() -> GoogleCredentials {
    GoogleCredentials::new("test-client-id", "test-client-secret")
}

#[tokio::test]
async fn test_valid_stored_token_served_without_refresh() {
    let mock = MockDirectoryServer::start().await;
    let token_dir = tempfile::tempdir().unwrap();
    let token_path = write_token_file(token_dir.path(), 60);

    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock.server)
        .await;

    let cache = TokenCache::load(
        token_path,
        test_credentials(),
        format!("{}/token", mock.uri()),
    )
    .unwrap();

    let token = cache.get_token().await.unwrap();
    assert_eq!(token, "test-access-token");
}

#[tokio::test]
async fn test_expired_token_is_refreshed_and_persisted() {
    let mock = MockDirectoryServer::start().await;
    let token_dir = tempfile::tempdir().unwrap();
    let token_path = write_token_file(token_dir.path(), -10);

    Mock::given(method("POST"))
        .and(path("/token"))
        .and(body_string_contains("grant_type=refresh_token"))
        .and(body_string_contains("refresh_token=test-refresh-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "fresh-access-token",
            "token_type": "Bearer",
            "expires_in": 3600
        })))
        .expect(1)
        .mount(&mock.server)
        .await;

    let cache = TokenCache::load(
        token_path.clone(),
        test_credentials(),
        format!("{}/token", mock.uri()),
    )
    .unwrap();

    let token = cache.get_token().await.unwrap();
    assert_eq!(token, "fresh-access-token");

    // The refreshed token reaches disk, keeping the original refresh token.
    let stored: StoredToken =
        serde_json::from_str(&fs::read_to_string(&token_path).unwrap()).unwrap();
    assert_eq!(stored.access_token, "fresh-access-token");
    assert_eq!(stored.refresh_token, "test-refresh-token");

    // A second call is served from the in-memory cache; expect(1) above
    // verifies the endpoint saw exactly one refresh.
    let again = cache.get_token().await.unwrap();
    assert_eq!(again, "fresh-access-token");
}

#[tokio::test]
async fn test_invalidate_forces_a_new_refresh() {
    let mock = MockDirectoryServer::start().await;
    let token_dir = tempfile::tempdir().unwrap();
    let token_path = write_token_file(token_dir.path(), -10);

    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "fresh-access-token",
            "token_type": "Bearer",
            "expires_in": 3600
        })))
        .expect(2)
        .mount(&mock.server)
        .await;

    let cache = TokenCache::load(
        token_path,
        test_credentials(),
        format!("{}/token", mock.uri()),
    )
    .unwrap();

    cache.get_token().await.unwrap();
    cache.invalidate().await;
    cache.get_token().await.unwrap();
}

#[tokio::test]
async fn test_missing_token_file_is_an_auth_error() {
    let token_dir = tempfile::tempdir().unwrap();
    let token_path = token_dir.path().join("absent.json");

    let result = TokenCache::load(
        token_path,
        test_credentials(),
        "https://oauth2.example.com/token",
    );

    assert!(matches!(result, Err(GoogleError::Auth(_))));
}

#[tokio::test]
async fn test_rejected_refresh_surfaces_an_auth_error() {
    let mock = MockDirectoryServer::start().await;
    let token_dir = tempfile::tempdir().unwrap();
    let token_path = write_token_file(token_dir.path(), -10);

    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": "invalid_grant",
            "error_description": "Token has been expired or revoked."
        })))
        .mount(&mock.server)
        .await;

    let cache = TokenCache::load(
        token_path,
        test_credentials(),
        format!("{}/token", mock.uri()),
    )
    .unwrap();

    let result = cache.get_token().await;
    assert!(matches!(result, Err(GoogleError::Auth(_))));
}
