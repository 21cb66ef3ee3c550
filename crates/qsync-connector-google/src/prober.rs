//! Existence probes against the remote directory.
//!
//! Each probe performs exactly one lookup by address key and collapses ANY
//! failure -- not-found, network, auth, malformed response -- into "does not
//! exist". Transient faults are therefore indistinguishable from true
//! absence; that loss of fidelity is a deliberate design tradeoff carried
//! over unchanged (a creation attempt after a masked fault fails with a
//! distinct error instead). The swallowed error is logged at debug level.

use tracing::{debug, instrument};

use crate::session::DirectorySession;

impl DirectorySession {
    /// Returns whether the address is a known individual account.
    #[instrument(skip(self))]
    pub async fn account_exists(&self, email: &str) -> bool {
        match self.get_user(email).await {
            Ok(user) => {
                debug!(id = %user.id, "account lookup hit");
                true
            }
            Err(e) => {
                debug!(error = %e, "account lookup read as absent");
                false
            }
        }
    }

    /// Returns whether the address is a known group.
    #[instrument(skip(self))]
    pub async fn group_exists(&self, email: &str) -> bool {
        match self.get_group(email).await {
            Ok(group) => {
                debug!(id = %group.id, "group lookup hit");
                true
            }
            Err(e) => {
                debug!(error = %e, "group lookup read as absent");
                false
            }
        }
    }
}
