//! Lookup-then-create reconciliation of alias files into directory groups.

use qsync_qmail::{AliasStore, SourceAddress};
use tracing::{debug, error, info, instrument};

use crate::error::GoogleResult;
use crate::session::DirectorySession;

/// Display-name prefix for groups created from alias files.
pub const GROUP_NAME_PREFIX: &str = "qmail redirect for: ";

/// Derives the group display name for a source address.
#[must_use]
pub fn group_name(source: &SourceAddress) -> String {
    format!("{GROUP_NAME_PREFIX}{}", source.email())
}

/// Terminal state of one reconciliation pass over a source address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// The address already exists as an individual account; no mutation.
    AlreadyAnAccount,
    /// The address already exists as a group; no mutation.
    AlreadyAGroup,
    /// The alias file yielded no qualifying redirects; no mutation.
    NoAliasesSkipped,
    /// A group was created and its memberships inserted.
    GroupCreated {
        group_id: String,
        members_added: usize,
        members_failed: usize,
    },
}

/// Summary of a full alias-store scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    pub scanned: usize,
    pub existing_accounts: usize,
    pub existing_groups: usize,
    pub skipped_no_aliases: usize,
    pub groups_created: usize,
    pub members_added: usize,
    pub members_failed: usize,
    /// Source addresses whose reconciliation failed outright.
    pub failures: usize,
}

impl ScanReport {
    fn record(&mut self, outcome: &ReconcileOutcome) {
        match outcome {
            ReconcileOutcome::AlreadyAnAccount => self.existing_accounts += 1,
            ReconcileOutcome::AlreadyAGroup => self.existing_groups += 1,
            ReconcileOutcome::NoAliasesSkipped => self.skipped_no_aliases += 1,
            ReconcileOutcome::GroupCreated {
                members_added,
                members_failed,
                ..
            } => {
                self.groups_created += 1;
                self.members_added += members_added;
                self.members_failed += members_failed;
            }
        }
    }
}

/// Reconciles source addresses against the remote directory.
#[derive(Debug)]
pub struct Reconciler<'a> {
    session: &'a DirectorySession,
    store: &'a AliasStore,
}

impl<'a> Reconciler<'a> {
    pub fn new(session: &'a DirectorySession, store: &'a AliasStore) -> Self {
        Self { session, store }
    }

    /// Reconciles one source address: probe account, probe group, parse the
    /// alias file, and create a group with memberships if nothing exists yet.
    ///
    /// Only the group-creation branch mutates the directory. A failed
    /// membership insert is logged and counted but does not roll back the
    /// group or block the remaining memberships.
    #[instrument(skip(self, source), fields(source = %source))]
    pub async fn reconcile(&self, source: &SourceAddress) -> GoogleResult<ReconcileOutcome> {
        let email = source.email();

        if self.session.account_exists(&email).await {
            info!("Address is an existing account, nothing to do");
            return Ok(ReconcileOutcome::AlreadyAnAccount);
        }

        if self.session.group_exists(&email).await {
            info!("Address is an existing group, nothing to do");
            return Ok(ReconcileOutcome::AlreadyAGroup);
        }

        let redirects = self.store.redirects(source)?;
        if redirects.is_empty() {
            info!("No qualifying redirects, not creating a group");
            return Ok(ReconcileOutcome::NoAliasesSkipped);
        }

        let group = self
            .session
            .insert_group(&group_name(source), &email)
            .await?;

        let mut members_added = 0;
        let mut members_failed = 0;
        for target in &redirects {
            match self.session.insert_member(&group.id, target.as_str()).await {
                Ok(member) => {
                    debug!(member = %target, id = ?member.id, "membership created");
                    members_added += 1;
                }
                Err(e) => {
                    error!(
                        member = %target,
                        error = %e,
                        "Failed to create membership, continuing with the rest"
                    );
                    members_failed += 1;
                }
            }
        }

        info!(
            group_id = %group.id,
            members_added,
            members_failed,
            "Group created"
        );

        Ok(ReconcileOutcome::GroupCreated {
            group_id: group.id,
            members_added,
            members_failed,
        })
    }

    /// Scans the alias store and reconciles every matching source address,
    /// one fully after another. A failed reconciliation is logged and
    /// counted; the scan always continues with the next address.
    #[instrument(skip(self))]
    pub async fn run(&self) -> GoogleResult<ScanReport> {
        let sources = self.store.scan()?;
        info!(count = sources.len(), "Scanning alias store");

        let mut report = ScanReport::default();
        for source in &sources {
            report.scanned += 1;
            match self.reconcile(source).await {
                Ok(outcome) => report.record(&outcome),
                Err(e) => {
                    error!(
                        source = %source,
                        error = %e,
                        "Reconciliation failed, continuing with the next address"
                    );
                    report.failures += 1;
                }
            }
        }

        info!(
            scanned = report.scanned,
            groups_created = report.groups_created,
            failures = report.failures,
            "Scan completed"
        );

        Ok(report)
    }
}
