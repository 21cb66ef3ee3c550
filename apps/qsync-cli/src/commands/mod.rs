//! Subcommand implementations.

pub mod inventory;
pub mod sync;

use std::path::PathBuf;

use clap::Args;
use qsync_connector_google::{DirectorySession, GoogleConfig, GoogleCredentials};

use crate::error::CliResult;

/// Connection arguments shared by all subcommands.
#[derive(Args, Debug)]
pub struct ConnectArgs {
    /// Path to the OAuth client secrets file from the API console
    #[arg(long, default_value = "credentials.json")]
    pub credentials: PathBuf,

    /// Path to the stored OAuth token file
    #[arg(long, default_value = "token.json")]
    pub token: PathBuf,

    /// Directory API endpoint override
    #[arg(long, hide = true)]
    pub endpoint: Option<String>,
}

impl ConnectArgs {
    /// Opens a directory session from the connection arguments.
    pub fn session(&self) -> CliResult<DirectorySession> {
        let mut builder = GoogleConfig::builder();
        if let Some(endpoint) = &self.endpoint {
            builder = builder.endpoint(endpoint.as_str());
        }
        let config = builder.build()?;

        let credentials = GoogleCredentials::from_client_secrets_file(&self.credentials)?;
        let session = DirectorySession::connect(config, credentials, self.token.clone())?;

        Ok(session)
    }
}
