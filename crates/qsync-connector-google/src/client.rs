//! Admin Directory API HTTP client.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::instrument;

use crate::auth::TokenCache;
use crate::error::{GoogleError, GoogleResult};

/// Error response body from the Directory API.
#[derive(Debug, Deserialize)]
pub struct ApiError {
    pub error: ApiErrorBody,
}

/// Error body of a Directory API error response.
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub code: u16,
    pub message: String,
    #[serde(default)]
    pub status: Option<String>,
}

/// Admin Directory API client.
///
/// Wraps `reqwest::Client` with bearer-token injection from the
/// [`TokenCache`] and Directory API error-body decoding. Calls are
/// synchronous from the caller's perspective and are never retried; a
/// failed call is final.
#[derive(Debug)]
pub struct DirectoryClient {
    http_client: reqwest::Client,
    token_cache: Arc<TokenCache>,
    base_url: String,
}

impl DirectoryClient {
    /// Creates a new Directory client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(token_cache: Arc<TokenCache>, endpoint: impl Into<String>) -> GoogleResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| GoogleError::Config(format!("Failed to create HTTP client: {e}")))?;

        let base_url = endpoint.into().trim_end_matches('/').to_string();

        Ok(Self {
            http_client,
            token_cache,
            base_url,
        })
    }

    /// Returns the base URL for Directory API requests.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Performs a GET request with automatic token injection.
    #[instrument(skip(self))]
    pub async fn get<T: DeserializeOwned>(&self, url: &str) -> GoogleResult<T> {
        self.request(reqwest::Method::GET, url, None::<&()>).await
    }

    /// Performs a POST request with automatic token injection.
    #[instrument(skip(self, body))]
    pub async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        url: &str,
        body: &B,
    ) -> GoogleResult<T> {
        self.request(reqwest::Method::POST, url, Some(body)).await
    }

    async fn request<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        method: reqwest::Method,
        url: &str,
        body: Option<&B>,
    ) -> GoogleResult<T> {
        let token = self.token_cache.get_token().await?;

        let mut request = self.http_client.request(method, url).bearer_auth(&token);
        if let Some(b) = body {
            request = request.json(b);
        }

        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            return response.json().await.map_err(GoogleError::from);
        }

        let error_body = response.text().await.unwrap_or_default();
        if let Ok(api_error) = serde_json::from_str::<ApiError>(&error_body) {
            return Err(GoogleError::DirectoryApi {
                code: api_error.error.code,
                message: api_error.error.message,
                status: api_error.error.status,
            });
        }

        Err(GoogleError::DirectoryApi {
            code: status.as_u16(),
            message: error_body,
            status: None,
        })
    }
}
