//! Storage layer for selavu
//!
//! One JSON table per entity under the data directory, plus the audit log.
//! Every service writes through `Storage` and records its change with one
//! of the `log_*` methods.

pub mod file_io;
pub mod init;
pub mod table;

pub use file_io::{read_json, read_json_required, write_json_atomic};
pub use init::initialize_storage;
pub use table::{JsonTable, Owned, Record};

use serde::Serialize;

use crate::audit::{generate_diff, AuditEntry, AuditLogger, EntityType};
use crate::config::paths::TrackerPaths;
use crate::error::TrackerResult;
use crate::models::{Category, Expense, Income, User};

/// Main storage coordinator that provides access to all tables
pub struct Storage {
    paths: TrackerPaths,
    pub users: JsonTable<User>,
    pub categories: JsonTable<Category>,
    pub expenses: JsonTable<Expense>,
    pub income: JsonTable<Income>,
    audit: AuditLogger,
}

impl Storage {
    /// Create a Storage over `paths` without reading anything
    pub fn new(paths: TrackerPaths) -> TrackerResult<Self> {
        paths.ensure_directories()?;

        Ok(Self {
            users: JsonTable::new(paths.users_file()),
            categories: JsonTable::new(paths.categories_file()),
            expenses: JsonTable::new(paths.expenses_file()),
            income: JsonTable::new(paths.income_file()),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    /// Create a Storage and load every table
    pub fn open(paths: TrackerPaths) -> TrackerResult<Self> {
        let storage = Self::new(paths)?;
        storage.load_all()?;
        Ok(storage)
    }

    pub fn paths(&self) -> &TrackerPaths {
        &self.paths
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    pub fn load_all(&self) -> TrackerResult<()> {
        self.users.load()?;
        self.categories.load()?;
        self.expenses.load()?;
        self.income.load()?;
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }

    pub fn log_create<T: Serialize>(
        &self,
        actor: Option<&str>,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> TrackerResult<()> {
        let entry = AuditEntry::create(entity_type, entity_id, entity_name, entity).by(actor);
        self.audit.log(&entry)
    }

    /// Log an update; the diff summary is computed from the two states
    pub fn log_update<T: Serialize>(
        &self,
        actor: Option<&str>,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
    ) -> TrackerResult<()> {
        let diff = match (serde_json::to_value(before), serde_json::to_value(after)) {
            (Ok(b), Ok(a)) => generate_diff(&b, &a),
            _ => None,
        };
        let entry =
            AuditEntry::update(entity_type, entity_id, entity_name, before, after, diff).by(actor);
        self.audit.log(&entry)
    }

    pub fn log_delete<T: Serialize>(
        &self,
        actor: Option<&str>,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> TrackerResult<()> {
        let entry = AuditEntry::delete(entity_type, entity_id, entity_name, entity).by(actor);
        self.audit.log(&entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use crate::models::UserId;
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert!(temp_dir.path().join("backups").exists());
        assert!(!storage.is_initialized());
    }

    #[test]
    fn test_open_empty_directory() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();
        assert_eq!(storage.users.count().unwrap(), 0);
    }

    #[test]
    fn test_log_update_records_diff() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        let before = Category::new("Food", UserId::from_raw(1));
        let mut after = before.clone();
        after.name = "Groceries".into();
        storage
            .log_update(Some("asha"), EntityType::Category, "cat-1", None, &before, &after)
            .unwrap();

        let entries = storage.audit().read_all().unwrap();
        assert_eq!(entries[0].operation, Operation::Update);
        assert_eq!(
            entries[0].diff_summary.as_deref(),
            Some("name: \"Food\" -> \"Groceries\"")
        );
    }
}
