//! Connector configuration and OAuth client credentials.

use std::fmt;
use std::fs;
use std::path::Path;

use secrecy::SecretString;
use serde::Deserialize;

use crate::error::{GoogleError, GoogleResult};

/// Default Admin Directory API endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://admin.googleapis.com/admin/directory/v1";

/// Default OAuth2 token endpoint.
pub const DEFAULT_TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";

/// Customer alias resolving to the authenticated account's own customer.
pub const DEFAULT_CUSTOMER: &str = "my_customer";

/// Connector configuration.
#[derive(Debug, Clone)]
pub struct GoogleConfig {
    /// Base URL of the Admin Directory API.
    pub endpoint: String,
    /// OAuth2 token endpoint used for refresh-token grants.
    pub token_endpoint: String,
    /// Customer key for list operations.
    pub customer: String,
    /// Page size for paginated list operations (1..=500).
    pub page_size: u32,
}

impl Default for GoogleConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            token_endpoint: DEFAULT_TOKEN_ENDPOINT.to_string(),
            customer: DEFAULT_CUSTOMER.to_string(),
            page_size: 100,
        }
    }
}

impl GoogleConfig {
    #[must_use]
    pub fn builder() -> GoogleConfigBuilder {
        GoogleConfigBuilder::default()
    }
}

/// Builder for [`GoogleConfig`].
#[derive(Debug, Default)]
pub struct GoogleConfigBuilder {
    endpoint: Option<String>,
    token_endpoint: Option<String>,
    customer: Option<String>,
    page_size: Option<u32>,
}

impl GoogleConfigBuilder {
    #[must_use]
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    #[must_use]
    pub fn token_endpoint(mut self, token_endpoint: impl Into<String>) -> Self {
        self.token_endpoint = Some(token_endpoint.into());
        self
    }

    #[must_use]
    pub fn customer(mut self, customer: impl Into<String>) -> Self {
        self.customer = Some(customer.into());
        self
    }

    #[must_use]
    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Builds the configuration, applying defaults and validating bounds.
    pub fn build(self) -> GoogleResult<GoogleConfig> {
        let defaults = GoogleConfig::default();
        let config = GoogleConfig {
            endpoint: self
                .endpoint
                .map(|e| e.trim_end_matches('/').to_string())
                .unwrap_or(defaults.endpoint),
            token_endpoint: self.token_endpoint.unwrap_or(defaults.token_endpoint),
            customer: self.customer.unwrap_or(defaults.customer),
            page_size: self.page_size.unwrap_or(defaults.page_size),
        };

        if config.endpoint.is_empty() {
            return Err(GoogleError::Config("endpoint must not be empty".into()));
        }
        if !(1..=500).contains(&config.page_size) {
            return Err(GoogleError::Config(format!(
                "page_size must be within 1..=500, got {}",
                config.page_size
            )));
        }

        Ok(config)
    }
}

/// OAuth2 client credentials for the connector.
///
/// The [`fmt::Debug`] impl redacts the client secret to prevent accidental
/// credential exposure in log output.
#[derive(Clone)]
pub struct GoogleCredentials {
    pub client_id: String,
    pub client_secret: SecretString,
}

impl fmt::Debug for GoogleCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoogleCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .finish()
    }
}

/// One entry of a Google client-secrets file.
#[derive(Debug, Deserialize)]
struct ClientSecrets {
    client_id: String,
    client_secret: String,
}

/// Google client-secrets file layout: the credentials sit under an
/// `installed` or `web` key depending on the OAuth client type.
#[derive(Debug, Deserialize)]
struct ClientSecretsFile {
    #[serde(default)]
    installed: Option<ClientSecrets>,
    #[serde(default)]
    web: Option<ClientSecrets>,
}

impl GoogleCredentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into().into(),
        }
    }

    /// Loads credentials from a Google client-secrets JSON file
    /// (the `credentials.json` downloaded from the API console).
    pub fn from_client_secrets_file(path: &Path) -> GoogleResult<Self> {
        let raw = fs::read_to_string(path).map_err(|e| {
            GoogleError::Config(format!(
                "client secrets file {} could not be read: {e}",
                path.display()
            ))
        })?;
        Self::from_client_secrets_json(&raw)
    }

    fn from_client_secrets_json(raw: &str) -> GoogleResult<Self> {
        let file: ClientSecretsFile = serde_json::from_str(raw)?;
        let secrets = file.installed.or(file.web).ok_or_else(|| {
            GoogleError::Config(
                "client secrets file contains neither an 'installed' nor a 'web' entry".into(),
            )
        })?;

        Ok(Self::new(secrets.client_id, secrets.client_secret))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_builder_defaults() {
        let config = GoogleConfig::builder().build().unwrap();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.token_endpoint, DEFAULT_TOKEN_ENDPOINT);
        assert_eq!(config.customer, DEFAULT_CUSTOMER);
        assert_eq!(config.page_size, 100);
    }

    #[test]
    fn test_builder_strips_trailing_slash() {
        let config = GoogleConfig::builder()
            .endpoint("http://localhost:8080/")
            .build()
            .unwrap();
        assert_eq!(config.endpoint, "http://localhost:8080");
    }

    #[test]
    fn test_builder_rejects_invalid_page_size() {
        let err = GoogleConfig::builder().page_size(0).build().unwrap_err();
        assert!(matches!(err, GoogleError::Config(_)));

        let err = GoogleConfig::builder().page_size(501).build().unwrap_err();
        assert!(matches!(err, GoogleError::Config(_)));
    }

    #[test]
    fn test_client_secrets_installed() {
        let raw = r#"{
            "installed": {
                "client_id": "abc.apps.googleusercontent.com",
                "client_secret": "s3cret",
                "redirect_uris": ["http://localhost"]
            }
        }"#;

        let credentials = GoogleCredentials::from_client_secrets_json(raw).unwrap();
        assert_eq!(credentials.client_id, "abc.apps.googleusercontent.com");
        assert_eq!(credentials.client_secret.expose_secret(), "s3cret");
    }

    #[test]
    fn test_client_secrets_web_fallback() {
        let raw = r#"{"web": {"client_id": "web-id", "client_secret": "web-secret"}}"#;
        let credentials = GoogleCredentials::from_client_secrets_json(raw).unwrap();
        assert_eq!(credentials.client_id, "web-id");
    }

    #[test]
    fn test_client_secrets_missing_entry() {
        let err = GoogleCredentials::from_client_secrets_json("{}").unwrap_err();
        assert!(matches!(err, GoogleError::Config(_)));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let credentials = GoogleCredentials::new("id", "super-secret");
        let rendered = format!("{credentials:?}");
        assert!(rendered.contains("[REDACTED]"));
        assert!(!rendered.contains("super-secret"));
    }
}
