//! Sync command - reconcile an alias store into directory groups

use std::path::PathBuf;

use clap::Args;
use qsync_connector_google::Reconciler;
use qsync_qmail::{AliasStore, DomainRules};
use tracing::info;

use crate::commands::ConnectArgs;
use crate::error::{CliError, CliResult};

/// Arguments for the sync command
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Mail domain the alias files belong to (e.g. example.com)
    pub domain: String,

    /// Directory holding the qmail alias files
    #[arg(long, default_value = "qmail-list")]
    pub alias_dir: PathBuf,

    /// Sandbox domain rewritten to the canonical domain in redirect targets
    /// (defaults to <domain>.test-google-a.com)
    #[arg(long)]
    pub sandbox_domain: Option<String>,

    #[command(flatten)]
    pub connect: ConnectArgs,
}

/// Execute the sync command
pub async fn execute(args: SyncArgs) -> CliResult<()> {
    let domain = args.domain.trim();
    if domain.is_empty() {
        return Err(CliError::Validation("domain must not be empty".into()));
    }

    let mut rules = DomainRules::new(domain);
    if let Some(sandbox) = &args.sandbox_domain {
        rules = rules.with_sandbox_domain(sandbox.as_str());
    }

    let store = AliasStore::new(&args.alias_dir, rules);
    let session = args.connect.session()?;

    info!(domain, alias_dir = %args.alias_dir.display(), "Starting sync");
    let report = Reconciler::new(&session, &store).run().await?;

    println!("Scanned {} alias file(s) for {domain}", report.scanned);
    println!("  existing accounts:  {}", report.existing_accounts);
    println!("  existing groups:    {}", report.existing_groups);
    println!("  skipped (no alias): {}", report.skipped_no_aliases);
    println!("  groups created:     {}", report.groups_created);
    println!("  members added:      {}", report.members_added);
    if report.members_failed > 0 {
        println!("  members failed:     {}", report.members_failed);
    }
    if report.failures > 0 {
        println!("  failed addresses:   {}", report.failures);
    }

    Ok(())
}
