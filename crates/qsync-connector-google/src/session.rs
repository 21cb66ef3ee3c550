//! Authenticated directory session.

use std::path::PathBuf;
use std::sync::Arc;

use crate::auth::TokenCache;
use crate::client::DirectoryClient;
use crate::config::{GoogleConfig, GoogleCredentials};
use crate::error::GoogleResult;

/// An authenticated handle to the remote directory.
///
/// Created once at startup from the stored token and shared read-only by
/// every lookup and mutation; the session itself is never mutated after
/// construction.
#[derive(Debug)]
pub struct DirectorySession {
    client: DirectoryClient,
    config: GoogleConfig,
}

impl DirectorySession {
    /// Builds a session from configuration, client credentials, and the
    /// path of the stored token file.
    pub fn connect(
        config: GoogleConfig,
        credentials: GoogleCredentials,
        token_path: impl Into<PathBuf>,
    ) -> GoogleResult<Self> {
        let token_cache = Arc::new(TokenCache::load(
            token_path.into(),
            credentials,
            config.token_endpoint.clone(),
        )?);
        let client = DirectoryClient::new(token_cache, config.endpoint.clone())?;

        Ok(Self { client, config })
    }

    /// Builds a session around a pre-built client (for testing).
    #[must_use]
    pub fn with_client(client: DirectoryClient, config: GoogleConfig) -> Self {
        Self { client, config }
    }

    pub(crate) fn client(&self) -> &DirectoryClient {
        &self.client
    }

    #[must_use]
    pub fn config(&self) -> &GoogleConfig {
        &self.config
    }
}
