//! Backup manager
//!
//! Every failure in here is reported as `TrackerError::Backup`.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::paths::TrackerPaths;
use crate::config::settings::BackupRetention;
use crate::error::{TrackerError, TrackerResult};

const ARCHIVE_SCHEMA_VERSION: u32 = 1;

fn backup_err(action: &str, err: impl std::fmt::Display) -> TrackerError {
    TrackerError::Backup(format!("{}: {}", action, err))
}

/// Metadata about a backup file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupInfo {
    pub filename: String,
    pub path: PathBuf,
    pub created_at: DateTime<Utc>,
    pub size_bytes: u64,
    /// First backup of its month, kept under the monthly quota
    pub is_monthly: bool,
}

/// Backup archive format
#[derive(Debug, Serialize, Deserialize)]
pub struct BackupArchive {
    pub schema_version: u32,
    pub created_at: DateTime<Utc>,
    pub settings: serde_json::Value,
    pub users: serde_json::Value,
    pub categories: serde_json::Value,
    pub expenses: serde_json::Value,
    pub income: serde_json::Value,
}

/// Manages backup creation and retention
pub struct BackupManager {
    backup_dir: PathBuf,
    paths: TrackerPaths,
    retention: BackupRetention,
}

impl BackupManager {
    pub fn new(paths: TrackerPaths, retention: BackupRetention) -> Self {
        Self {
            backup_dir: paths.backup_dir(),
            paths,
            retention,
        }
    }

    pub fn backup_dir(&self) -> &PathBuf {
        &self.backup_dir
    }

    /// Snapshot all data into a new archive, returning its path
    pub fn create_backup(&self) -> TrackerResult<PathBuf> {
        fs::create_dir_all(&self.backup_dir)
            .map_err(|e| backup_err("Failed to create backup directory", e))?;

        let now = Utc::now();
        let filename = format!(
            "backup-{}-{:03}.json",
            now.format("%Y%m%d-%H%M%S"),
            now.timestamp_subsec_millis()
        );
        let backup_path = self.backup_dir.join(&filename);

        let archive = self.create_archive(now)?;
        let json = serde_json::to_string_pretty(&archive)
            .map_err(|e| backup_err("Failed to serialize backup", e))?;
        fs::write(&backup_path, json).map_err(|e| backup_err("Failed to write backup file", e))?;

        info!(path = %backup_path.display(), "backup created");
        Ok(backup_path)
    }

    fn create_archive(&self, timestamp: DateTime<Utc>) -> TrackerResult<BackupArchive> {
        Ok(BackupArchive {
            schema_version: ARCHIVE_SCHEMA_VERSION,
            created_at: timestamp,
            settings: read_json_value(&self.paths.settings_file())?,
            users: read_json_value(&self.paths.users_file())?,
            categories: read_json_value(&self.paths.categories_file())?,
            expenses: read_json_value(&self.paths.expenses_file())?,
            income: read_json_value(&self.paths.income_file())?,
        })
    }

    /// All backups, newest first
    pub fn list_backups(&self) -> TrackerResult<Vec<BackupInfo>> {
        if !self.backup_dir.exists() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&self.backup_dir)
            .map_err(|e| backup_err("Failed to read backup directory", e))?;

        let mut backups = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| backup_err("Failed to read directory entry", e))?;
            if let Some(info) = parse_backup_info(&entry.path()) {
                backups.push(info);
            }
        }

        // Oldest first so the first of each month is seen first
        backups.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        let mut seen_months = HashSet::new();
        for backup in &mut backups {
            let month = (backup.created_at.year(), backup.created_at.month());
            backup.is_monthly = seen_months.insert(month);
        }
        backups.reverse();

        Ok(backups)
    }

    /// Delete backups beyond the retention quotas, returning what was removed
    pub fn enforce_retention(&self) -> TrackerResult<Vec<PathBuf>> {
        let (monthly, daily): (Vec<_>, Vec<_>) =
            self.list_backups()?.into_iter().partition(|b| b.is_monthly);

        let expired = daily
            .into_iter()
            .skip(self.retention.daily_count as usize)
            .chain(monthly.into_iter().skip(self.retention.monthly_count as usize));

        let mut deleted = Vec::new();
        for backup in expired {
            fs::remove_file(&backup.path).map_err(|e| backup_err("Failed to delete old backup", e))?;
            deleted.push(backup.path);
        }

        if !deleted.is_empty() {
            info!(count = deleted.len(), "old backups removed");
        }
        Ok(deleted)
    }

    /// Create a backup and then enforce the retention policy
    pub fn create_backup_with_retention(&self) -> TrackerResult<(PathBuf, Vec<PathBuf>)> {
        let backup_path = self.create_backup()?;
        let deleted = self.enforce_retention()?;
        Ok((backup_path, deleted))
    }

    pub fn get_latest_backup(&self) -> TrackerResult<Option<BackupInfo>> {
        Ok(self.list_backups()?.into_iter().next())
    }

    /// Snapshot the current data and copy the archive to `dest`
    ///
    /// When `dest` is an existing directory the archive keeps its own file
    /// name inside it. Returns the path written.
    pub fn copy_to(&self, dest: &Path) -> TrackerResult<PathBuf> {
        let source = self.create_backup()?;

        let target = if dest.is_dir() {
            match source.file_name() {
                Some(name) => dest.join(name),
                None => return Err(TrackerError::Backup("Backup file has no name".into())),
            }
        } else {
            dest.to_path_buf()
        };

        fs::copy(&source, &target).map_err(|e| {
            warn!(dest = %target.display(), error = %e, "database copy failed");
            backup_err(&format!("Failed to copy database to {}", target.display()), e)
        })?;

        info!(dest = %target.display(), "database copied");
        Ok(target)
    }
}

/// A missing file is archived as `null`
fn read_json_value(path: &Path) -> TrackerResult<serde_json::Value> {
    if !path.exists() {
        return Ok(serde_json::Value::Null);
    }

    let contents =
        fs::read_to_string(path).map_err(|e| backup_err("Failed to read file for backup", e))?;
    serde_json::from_str(&contents).map_err(|e| {
        backup_err(&format!("Failed to parse {} for backup", path.display()), e)
    })
}

fn parse_backup_info(path: &Path) -> Option<BackupInfo> {
    let filename = path.file_name()?.to_string_lossy().to_string();
    let stamp = filename.strip_prefix("backup-")?.strip_suffix(".json")?;
    let created_at = parse_backup_timestamp(stamp)?;
    let size_bytes = fs::metadata(path).ok()?.len();

    Some(BackupInfo {
        filename,
        path: path.to_path_buf(),
        created_at,
        size_bytes,
        is_monthly: false,
    })
}

/// Parse `YYYYMMDD-HHMMSS-mmm` (milliseconds optional)
fn parse_backup_timestamp(stamp: &str) -> Option<DateTime<Utc>> {
    let mut parts = stamp.splitn(3, '-');
    let date = NaiveDate::parse_from_str(parts.next()?, "%Y%m%d").ok()?;
    let time = NaiveTime::parse_from_str(parts.next()?, "%H%M%S").ok()?;
    let millis: u32 = match parts.next() {
        Some(ms) => ms.parse().ok()?,
        None => 0,
    };
    let datetime = NaiveDateTime::new(date, time) + chrono::Duration::milliseconds(millis as i64);
    Some(DateTime::from_naive_utc_and_offset(datetime, Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_manager() -> (BackupManager, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());
        paths.ensure_directories().unwrap();

        let retention = BackupRetention {
            daily_count: 3,
            monthly_count: 2,
        };
        (BackupManager::new(paths, retention), temp_dir)
    }

    fn pause() {
        std::thread::sleep(std::time::Duration::from_millis(5));
    }

    /// Drop an empty archive with a chosen timestamp into the backup dir
    fn fake_backup(manager: &BackupManager, stamp: &str) {
        fs::write(manager.backup_dir().join(format!("backup-{}.json", stamp)), "{}").unwrap();
    }

    #[test]
    fn test_create_backup_contains_every_table() {
        let (manager, _temp) = create_test_manager();
        fs::write(manager.paths.expenses_file(), r#"{"next_id":1,"records":[]}"#).unwrap();

        let backup_path = manager.create_backup().unwrap();
        let archive: BackupArchive =
            serde_json::from_str(&fs::read_to_string(&backup_path).unwrap()).unwrap();

        assert_eq!(archive.schema_version, 1);
        assert_eq!(archive.expenses["next_id"], 1);
        assert!(archive.users.is_null());
    }

    #[test]
    fn test_list_backups_newest_first() {
        let (manager, _temp) = create_test_manager();
        manager.create_backup().unwrap();
        pause();
        manager.create_backup().unwrap();

        let backups = manager.list_backups().unwrap();
        assert_eq!(backups.len(), 2);
        assert!(backups[0].created_at > backups[1].created_at);
        assert!(manager.get_latest_backup().unwrap().unwrap().path == backups[0].path);
    }

    #[test]
    fn test_first_backup_of_month_is_monthly() {
        let (manager, _temp) = create_test_manager();
        fake_backup(&manager, "20250115-100000-000");
        fake_backup(&manager, "20250103-100000-000");
        fake_backup(&manager, "20250201-090000-000");

        let backups = manager.list_backups().unwrap();
        let monthly: Vec<_> = backups
            .iter()
            .filter(|b| b.is_monthly)
            .map(|b| b.filename.as_str())
            .collect();
        assert_eq!(
            monthly,
            vec!["backup-20250201-090000-000.json", "backup-20250103-100000-000.json"]
        );
    }

    #[test]
    fn test_retention_policy() {
        let (manager, _temp) = create_test_manager();
        // Three monthly backups and five daily ones
        for stamp in [
            "20250101-000000-000",
            "20250201-000000-000",
            "20250301-000000-000",
            "20250302-000000-000",
            "20250303-000000-000",
            "20250304-000000-000",
            "20250305-000000-000",
            "20250306-000000-000",
        ] {
            fake_backup(&manager, stamp);
        }

        let deleted = manager.enforce_retention().unwrap();
        assert_eq!(deleted.len(), 3);
        assert!(!manager.backup_dir().join("backup-20250101-000000-000.json").exists());
        assert!(!manager.backup_dir().join("backup-20250302-000000-000.json").exists());
        assert_eq!(manager.list_backups().unwrap().len(), 5);
    }

    #[test]
    fn test_unrelated_files_ignored() {
        let (manager, _temp) = create_test_manager();
        fs::write(manager.backup_dir().join("notes.txt"), "hi").unwrap();
        fs::write(manager.backup_dir().join("backup-garbage.json"), "{}").unwrap();
        assert!(manager.list_backups().unwrap().is_empty());
        assert!(manager.get_latest_backup().unwrap().is_none());
    }

    #[test]
    fn test_parse_backup_timestamp() {
        let timestamp = parse_backup_timestamp("20251127-143022").unwrap();
        assert_eq!((timestamp.year(), timestamp.month(), timestamp.day()), (2025, 11, 27));

        let with_millis = parse_backup_timestamp("20251127-143022-456").unwrap();
        assert_eq!(with_millis.timestamp_subsec_millis(), 456);

        assert!(parse_backup_timestamp("2025-11-27").is_none());
    }

    #[test]
    fn test_copy_to_file_and_directory() {
        let (manager, temp) = create_test_manager();

        let file_dest = temp.path().join("export.json");
        let written = manager.copy_to(&file_dest).unwrap();
        assert_eq!(written, file_dest);
        assert!(file_dest.exists());

        pause();
        let dir_dest = temp.path().join("downloads");
        fs::create_dir_all(&dir_dest).unwrap();
        let written = manager.copy_to(&dir_dest).unwrap();
        assert_eq!(written.parent().unwrap(), dir_dest);
        assert!(written.file_name().unwrap().to_string_lossy().starts_with("backup-"));
    }

    #[test]
    fn test_copy_to_unwritable_destination_is_backup_error() {
        let (manager, temp) = create_test_manager();
        let dest = temp.path().join("no-such-dir").join("db.json");

        let err = manager.copy_to(&dest).unwrap_err();
        assert!(matches!(err, TrackerError::Backup(_)));
    }
}
