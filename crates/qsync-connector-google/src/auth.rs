//! OAuth2 token cache with on-disk persistence.
//!
//! The interactive consent flow is an external bootstrap; this module only
//! loads a previously granted token, serves it while valid, refreshes it via
//! the `refresh_token` grant when it expires, and writes the refreshed token
//! back to the token file.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use crate::config::GoogleCredentials;
use crate::error::{GoogleError, GoogleResult};

/// Authorized-user token as persisted in the token file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredToken {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: DateTime<Utc>,
}

/// OAuth2 token response from the token endpoint.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

/// Cached OAuth2 access token.
#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    /// Returns true if the token is expired or will expire within the grace period.
    fn is_expired(&self, grace_period: Duration) -> bool {
        Utc::now() + grace_period >= self.expires_at
    }
}

/// Token cache for managing OAuth2 access tokens.
#[derive(Debug)]
pub struct TokenCache {
    credentials: GoogleCredentials,
    token_endpoint: String,
    token_path: PathBuf,
    refresh_token: String,
    http_client: reqwest::Client,
    cached_token: Arc<RwLock<Option<CachedToken>>>,
    /// Grace period before expiry to trigger refresh (default: 5 minutes).
    grace_period: Duration,
}

impl TokenCache {
    /// Loads the stored token from disk and builds a cache around it.
    ///
    /// A missing or malformed token file is an authentication error; the
    /// consent bootstrap has to be run externally before this tool.
    pub fn load(
        token_path: PathBuf,
        credentials: GoogleCredentials,
        token_endpoint: impl Into<String>,
    ) -> GoogleResult<Self> {
        let raw = fs::read_to_string(&token_path).map_err(|e| {
            GoogleError::Auth(format!(
                "token file {} could not be read (run the consent bootstrap first): {e}",
                token_path.display()
            ))
        })?;
        let stored: StoredToken = serde_json::from_str(&raw).map_err(|e| {
            GoogleError::Auth(format!(
                "token file {} is malformed: {e}",
                token_path.display()
            ))
        })?;

        Ok(Self {
            credentials,
            token_endpoint: token_endpoint.into(),
            token_path,
            refresh_token: stored.refresh_token,
            http_client: reqwest::Client::new(),
            cached_token: Arc::new(RwLock::new(Some(CachedToken {
                access_token: stored.access_token,
                expires_at: stored.expires_at,
            }))),
            grace_period: Duration::minutes(5),
        })
    }

    /// Gets a valid access token, refreshing and persisting if necessary.
    #[instrument(skip(self))]
    pub async fn get_token(&self) -> GoogleResult<String> {
        // Check if we have a valid cached token
        {
            let cache = self.cached_token.read().await;
            if let Some(ref token) = *cache {
                if !token.is_expired(self.grace_period) {
                    debug!("Using cached token");
                    return Ok(token.access_token.clone());
                }
            }
        }

        // Need to refresh
        debug!("Refreshing access token");
        let new_token = self.refresh_access_token().await?;
        self.persist(&new_token)?;

        // Update cache
        {
            let mut cache = self.cached_token.write().await;
            *cache = Some(new_token.clone());
        }

        Ok(new_token.access_token)
    }

    /// Acquires a new access token using the refresh-token grant.
    #[instrument(skip(self))]
    async fn refresh_access_token(&self) -> GoogleResult<CachedToken> {
        use secrecy::ExposeSecret;

        let params = [
            ("grant_type", "refresh_token"),
            ("client_id", &self.credentials.client_id),
            (
                "client_secret",
                self.credentials.client_secret.expose_secret(),
            ),
            ("refresh_token", &self.refresh_token),
        ];

        let response = self
            .http_client
            .post(&self.token_endpoint)
            .form(&params)
            .send()
            .await
            .map_err(|e| GoogleError::Auth(format!("Token request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(GoogleError::Auth(format!(
                "Token request failed with status {status}: {body}"
            )));
        }

        let token_response: TokenResponse = response
            .json()
            .await
            .map_err(|e| GoogleError::Auth(format!("Failed to parse token response: {e}")))?;

        let expires_at = Utc::now() + Duration::seconds(token_response.expires_in);

        debug!(
            "Acquired new token, expires at {}",
            expires_at.format("%Y-%m-%d %H:%M:%S UTC")
        );

        Ok(CachedToken {
            access_token: token_response.access_token,
            expires_at,
        })
    }

    /// Writes the refreshed token back to the token file.
    fn persist(&self, token: &CachedToken) -> GoogleResult<()> {
        let stored = StoredToken {
            access_token: token.access_token.clone(),
            refresh_token: self.refresh_token.clone(),
            expires_at: token.expires_at,
        };
        let json = serde_json::to_string_pretty(&stored)?;
        fs::write(&self.token_path, json).map_err(|e| {
            GoogleError::TokenStore(format!("{}: {e}", self.token_path.display()))
        })
    }

    /// Invalidates the cached token, forcing a refresh on next use.
    pub async fn invalidate(&self) {
        let mut cache = self.cached_token.write().await;
        *cache = None;
    }
}
