//! Backups of the whole data directory
//!
//! A backup is one JSON archive holding every table and the settings,
//! written to the backup directory as `backup-YYYYMMDD-HHMMSS-mmm.json`.
//!
//! # Retention Policy
//!
//! The first backup of each calendar month counts as a monthly backup,
//! everything else as a daily one. By default 30 daily and 12 monthly
//! backups are kept.
//!
//! `BackupManager::copy_to` is the "download the database" operation: it
//! snapshots the current data and copies the archive to a path of the
//! caller's choosing.

mod manager;

pub use manager::{BackupArchive, BackupInfo, BackupManager};
