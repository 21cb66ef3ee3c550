//! Google Workspace Admin Directory connector for qsync
//!
//! This crate talks to the Admin Directory API and reconciles qmail alias
//! files into directory groups: for each source address it probes whether
//! an account or group already exists and, when neither does, creates a
//! group whose memberships replicate the alias file's redirect targets.
//!
//! # Features
//!
//! - `OAuth2` token cache with refresh-token grant and on-disk persistence
//! - Typed user, group, and membership operations with pagination
//! - Existence probes that read any lookup failure as absence (deliberate,
//!   see [`prober`](crate::DirectorySession::account_exists))
//! - Sequential, fault-contained reconciliation of a whole alias store
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use qsync_connector_google::{
//!     DirectorySession, GoogleConfig, GoogleCredentials, Reconciler,
//! };
//! use qsync_qmail::{AliasStore, DomainRules};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = GoogleConfig::builder().build()?;
//! let credentials = GoogleCredentials::from_client_secrets_file(Path::new("credentials.json"))?;
//! let session = DirectorySession::connect(config, credentials, "token.json")?;
//!
//! let store = AliasStore::new("qmail-list", DomainRules::new("example.com"));
//! let report = Reconciler::new(&session, &store).run().await?;
//! println!("created {} groups", report.groups_created);
//! # Ok(())
//! # }
//! ```

mod auth;
mod client;
mod config;
mod error;
mod groups;
mod prober;
mod reconciler;
mod session;
mod users;

// Re-exports
pub use auth::{StoredToken, TokenCache};
pub use client::{ApiError, ApiErrorBody, DirectoryClient};
pub use config::{
    GoogleConfig, GoogleConfigBuilder, GoogleCredentials, DEFAULT_CUSTOMER, DEFAULT_ENDPOINT,
    DEFAULT_TOKEN_ENDPOINT,
};
pub use error::{GoogleError, GoogleResult};
pub use groups::{
    DirectoryGroup, DirectoryMember, GroupInsert, MemberInsert, MemberRole, MemberType,
};
pub use reconciler::{group_name, ReconcileOutcome, Reconciler, ScanReport, GROUP_NAME_PREFIX};
pub use session::DirectorySession;
pub use users::{DirectoryUser, UserName};
