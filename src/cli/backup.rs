//! Backup CLI commands
//!
//! Every backup command needs an admin session.

use std::path::PathBuf;

use clap::Subcommand;

use crate::backup::BackupManager;
use crate::config::settings::Settings;
use crate::error::TrackerResult;
use crate::services::Session;
use crate::storage::Storage;

/// Backup subcommands
#[derive(Subcommand)]
pub enum BackupCommands {
    /// Create a new backup and prune old ones
    Create,

    /// List all available backups
    List {
        /// Show detailed information
        #[arg(short, long)]
        verbose: bool,
    },

    /// Copy a fresh snapshot of the database to a file or directory
    #[command(alias = "download")]
    Copy {
        /// Destination file, or directory to place the snapshot in
        dest: PathBuf,
    },
}

/// Handle a backup command
pub fn handle_backup_command(
    storage: &Storage,
    settings: &Settings,
    session: &Session,
    cmd: BackupCommands,
) -> TrackerResult<()> {
    session.require_admin()?;
    let manager = BackupManager::new(storage.paths().clone(), settings.backup_retention.clone());

    match cmd {
        BackupCommands::Create => {
            let (backup_path, pruned) = manager.create_backup_with_retention()?;
            println!("Backup created: {}", backup_path.display());
            if !pruned.is_empty() {
                println!("Removed {} old backup(s)", pruned.len());
            }
        }

        BackupCommands::List { verbose } => {
            let backups = manager.list_backups()?;

            if backups.is_empty() {
                println!("No backups found.");
                println!("Create one with: selavu backup create");
                return Ok(());
            }

            println!("Available Backups");
            println!("=================");
            for (i, backup) in backups.iter().enumerate() {
                let monthly_marker = if backup.is_monthly { " [monthly]" } else { "" };
                if verbose {
                    println!(
                        "{}. {}{}\n   Created: {}\n   Size: {}\n   Path: {}",
                        i + 1,
                        backup.filename,
                        monthly_marker,
                        backup.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
                        format_size(backup.size_bytes),
                        backup.path.display()
                    );
                } else {
                    println!(
                        "  {}. {} ({}){}",
                        i + 1,
                        backup.filename,
                        format_size(backup.size_bytes),
                        monthly_marker
                    );
                }
            }
            println!();
            println!("Total: {} backup(s)", backups.len());
        }

        BackupCommands::Copy { dest } => {
            let written = manager.copy_to(&dest)?;
            println!("Database copied to {}", written.display());
        }
    }

    Ok(())
}

fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0 MB");
    }
}
