//! qmail alias-file handling for qsync
//!
//! This crate covers the local half of the migration: reading a qmail-style
//! alias store, matching file names against a domain's naming convention, and
//! extracting the redirect targets listed inside each alias file.
//!
//! # Example
//!
//! ```no_run
//! use qsync_qmail::{AliasStore, DomainRules};
//!
//! # fn example() -> Result<(), qsync_qmail::QmailError> {
//! let store = AliasStore::new("qmail-list", DomainRules::new("example.com"));
//! for source in store.scan()? {
//!     let redirects = store.redirects(&source)?;
//!     println!("{source}: {} redirects", redirects.len());
//! }
//! # Ok(())
//! # }
//! ```

mod alias;
mod error;
mod scanner;

pub use alias::{
    parse_redirects, DomainRules, RedirectTarget, SourceAddress, FORWARD_MARKER, LOCAL_ONLY_MARKER,
};
pub use error::{QmailError, QmailResult};
pub use scanner::{alias_file_name, domain_stem, match_alias_file_name, AliasStore};
