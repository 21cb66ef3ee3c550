//! Error types for the Google Directory connector.

use thiserror::Error;

/// Result type alias using `GoogleError`.
pub type GoogleResult<T> = Result<T, GoogleError>;

/// Errors that can occur when interacting with the Admin Directory API.
#[derive(Debug, Error)]
pub enum GoogleError {
    /// Configuration validation error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// `OAuth2` authentication error.
    #[error("Authentication error: {0}")]
    Auth(String),

    /// The stored token could not be persisted.
    #[error("Token store error: {0}")]
    TokenStore(String),

    /// Directory API error response.
    #[error("Directory API error: {code} - {message}")]
    DirectoryApi {
        code: u16,
        message: String,
        status: Option<String>,
    },

    /// HTTP request error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Local alias store error.
    #[error("Alias store error: {0}")]
    Qmail(#[from] qsync_qmail::QmailError),
}
