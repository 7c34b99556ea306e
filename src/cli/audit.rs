//! Audit log CLI command

use clap::Args;

use crate::error::TrackerResult;
use crate::services::Session;
use crate::storage::Storage;

/// Audit log options
#[derive(Args)]
pub struct AuditArgs {
    /// Number of most recent entries to show
    #[arg(short = 'n', long, default_value = "20")]
    pub limit: usize,
}

/// Show the most recent audit entries (admin only)
pub fn handle_audit_command(
    storage: &Storage,
    session: &Session,
    args: AuditArgs,
) -> TrackerResult<()> {
    session.require_admin()?;

    let entries = storage.audit().read_recent(args.limit)?;
    if entries.is_empty() {
        println!("Audit log is empty.");
        return Ok(());
    }

    for entry in &entries {
        println!("{}", entry.format_human_readable());
    }
    println!();
    println!(
        "Showing {} of {} entries",
        entries.len(),
        storage.audit().entry_count()?
    );

    Ok(())
}
