//! Error types for the qmail alias store.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `QmailError`.
pub type QmailResult<T> = Result<T, QmailError>;

/// Errors that can occur when reading the local alias store.
#[derive(Debug, Error)]
pub enum QmailError {
    /// An alias file matched the naming pattern but could not be read.
    #[error("alias file {} could not be read: {source}", .path.display())]
    AliasFile {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The alias store directory could not be enumerated.
    #[error("alias store {} could not be enumerated: {source}", .path.display())]
    Store {
        path: PathBuf,
        source: std::io::Error,
    },
}
