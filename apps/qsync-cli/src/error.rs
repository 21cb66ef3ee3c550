//! CLI error types and exit codes

use thiserror::Error;

/// Exit codes for the CLI
/// - 0: Success
/// - 1: General error
/// - 2: Authentication required
pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("{0}")]
    Qmail(#[from] qsync_qmail::QmailError),

    #[error("{0}")]
    Google(#[from] qsync_connector_google::GoogleError),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Google(qsync_connector_google::GoogleError::Auth(_)) => 2,
            _ => 1,
        }
    }
}
