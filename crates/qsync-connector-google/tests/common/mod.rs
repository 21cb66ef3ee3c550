//! Common test utilities: a mock Directory API server and fixtures.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use chrono::{Duration, Utc};
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use qsync_connector_google::{
    DirectorySession, GoogleConfig, GoogleCredentials, StoredToken,
};

/// Writes a stored token expiring `expires_in_minutes` from now (negative
/// for an already-expired token) and returns its path.
pub fn write_token_file(dir: &Path, expires_in_minutes: i64) -> PathBuf {
    let token = StoredToken {
        access_token: "test-access-token".to_string(),
        refresh_token: "test-refresh-token".to_string(),
        expires_at: Utc::now() + Duration::minutes(expires_in_minutes),
    };
    let token_path = dir.join("token.json");
    std::fs::write(&token_path, serde_json::to_string(&token).unwrap()).unwrap();
    token_path
}

/// Test data factory for directory users.
pub fn user_json(id: &str, email: &str) -> Value {
    json!({
        "kind": "admin#directory#user",
        "id": id,
        "primaryEmail": email,
        "suspended": false
    })
}

/// Test data factory for directory groups.
pub fn group_json(id: &str, email: &str, name: &str) -> Value {
    json!({
        "kind": "admin#directory#group",
        "id": id,
        "email": email,
        "name": name
    })
}

/// Test data factory for group memberships.
pub fn member_json(id: &str, email: &str) -> Value {
    json!({
        "kind": "admin#directory#member",
        "id": id,
        "email": email,
        "role": "MEMBER",
        "type": "USER",
        "status": "ACTIVE"
    })
}

/// Test data factory for Directory API error bodies.
pub fn error_json(code: u16, status: &str, message: &str) -> Value {
    json!({
        "error": {
            "code": code,
            "message": message,
            "status": status
        }
    })
}

/// Mock Directory API server wrapper with common setup helpers.
pub struct MockDirectoryServer {
    pub server: MockServer,
}

impl MockDirectoryServer {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// Builds a session against this server backed by a fresh, unexpired
    /// token written into `token_dir`.
    pub fn session(&self, token_dir: &Path) -> DirectorySession {
        let token_path = write_token_file(token_dir, 60);
        let config = GoogleConfig::builder()
            .endpoint(self.uri())
            .token_endpoint(format!("{}/token", self.uri()))
            .build()
            .unwrap();

        DirectorySession::connect(
            config,
            GoogleCredentials::new("test-client-id", "test-client-secret"),
            token_path,
        )
        .unwrap()
    }

    /// Mocks the token endpoint to issue a fresh access token.
    pub async fn mock_token_endpoint(&self, access_token: &str) {
        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": access_token,
                "token_type": "Bearer",
                "expires_in": 3600
            })))
            .mount(&self.server)
            .await;
    }

    /// Mocks a user lookup returning the given account.
    pub async fn mock_user_found(&self, email: &str, id: &str) {
        Mock::given(method("GET"))
            .and(path(format!("/users/{email}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(user_json(id, email)))
            .mount(&self.server)
            .await;
    }

    /// Mocks a user lookup failing with the given HTTP status.
    pub async fn mock_user_lookup_status(&self, email: &str, code: u16) {
        let status = if code == 404 { "NOT_FOUND" } else { "INTERNAL" };
        Mock::given(method("GET"))
            .and(path(format!("/users/{email}")))
            .respond_with(
                ResponseTemplate::new(code)
                    .set_body_json(error_json(code, status, "user lookup failed")),
            )
            .mount(&self.server)
            .await;
    }

    /// Mocks a group lookup returning the given group.
    pub async fn mock_group_found(&self, email: &str, id: &str) {
        Mock::given(method("GET"))
            .and(path(format!("/groups/{email}")))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(group_json(id, email, "existing group")),
            )
            .mount(&self.server)
            .await;
    }

    /// Mocks a group lookup failing with the given HTTP status.
    pub async fn mock_group_lookup_status(&self, email: &str, code: u16) {
        let status = if code == 404 { "NOT_FOUND" } else { "INTERNAL" };
        Mock::given(method("GET"))
            .and(path(format!("/groups/{email}")))
            .respond_with(
                ResponseTemplate::new(code)
                    .set_body_json(error_json(code, status, "group lookup failed")),
            )
            .mount(&self.server)
            .await;
    }
}
