//! Inventory command - list directory accounts and groups

use clap::Args;
use qsync_connector_google::MemberType;
use tracing::warn;

use crate::commands::ConnectArgs;
use crate::error::CliResult;

/// Arguments for the inventory command
#[derive(Args, Debug)]
pub struct InventoryArgs {
    #[command(flatten)]
    pub connect: ConnectArgs,
}

/// Execute the inventory command
pub async fn execute(args: InventoryArgs) -> CliResult<()> {
    let session = args.connect.session()?;

    let users = session.list_users().await?;
    println!("Accounts ({}):", users.len());
    for user in &users {
        println!("  {}", user.primary_email);
    }

    let groups = session.list_groups().await?;
    println!("Groups ({}):", groups.len());
    for group in &groups {
        println!("  {} ({})", group.email, group.name);
        match session.list_members(&group.email).await {
            Ok(members) => {
                for member in members
                    .iter()
                    .filter(|m| m.member_type == MemberType::User)
                {
                    println!("    -> {}", member.email);
                }
            }
            Err(e) => {
                warn!(group = %group.email, error = %e, "Could not list group members");
            }
        }
    }

    Ok(())
}
