//! qsync CLI - migrate qmail alias files into Google Workspace groups
//!
//! This CLI enables administrators to:
//! - Sync an alias store: create a group with memberships for every alias
//!   file whose address is not yet an account or group
//! - Take an inventory of existing accounts, groups, and memberships

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod error;

use error::CliResult;

/// qsync - qmail alias to directory group migration
#[derive(Parser)]
#[command(name = "qsync")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconcile an alias store into directory groups
    Sync(commands::sync::SyncArgs),

    /// List directory accounts, groups, and their memberships
    Inventory(commands::inventory::InventoryArgs),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}

async fn run(cli: Cli) -> CliResult<()> {
    match cli.command {
        Commands::Sync(args) => commands::sync::execute(args).await,
        Commands::Inventory(args) => commands::inventory::execute(args).await,
    }
}
