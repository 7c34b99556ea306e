//! First-run setup of the data directory

use tracing::info;

use crate::config::paths::TrackerPaths;
use crate::config::settings::Settings;
use crate::error::TrackerResult;
use crate::models::{Category, Expense, Income, User};

use super::table::{JsonTable, Record};

/// Create the directory layout, the settings file and empty tables
///
/// Existing files are left untouched, so running this twice is harmless.
/// Returns `true` if anything was created.
pub fn initialize_storage(paths: &TrackerPaths, settings: &Settings) -> TrackerResult<bool> {
    paths.ensure_directories()?;
    let mut created = false;

    if !paths.settings_file().exists() {
        settings.save(paths)?;
        created = true;
    }

    created |= create_empty_table::<User>(&JsonTable::new(paths.users_file()))?;
    created |= create_empty_table::<Category>(&JsonTable::new(paths.categories_file()))?;
    created |= create_empty_table::<Expense>(&JsonTable::new(paths.expenses_file()))?;
    created |= create_empty_table::<Income>(&JsonTable::new(paths.income_file()))?;

    if created {
        info!(base_dir = %paths.base_dir().display(), "initialized data directory");
    }
    Ok(created)
}

fn create_empty_table<T: Record>(table: &JsonTable<T>) -> TrackerResult<bool> {
    if table.path().exists() {
        return Ok(false);
    }
    table.save()?;
    Ok(true)
}

/// Check if the data directory still needs `init`
pub fn needs_initialization(paths: &TrackerPaths) -> bool {
    !paths.is_initialized()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserId;
    use tempfile::TempDir;

    #[test]
    fn test_initialize_storage() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());
        assert!(needs_initialization(&paths));

        assert!(initialize_storage(&paths, &Settings::default()).unwrap());

        assert!(!needs_initialization(&paths));
        assert!(paths.users_file().exists());
        assert!(paths.categories_file().exists());
        assert!(paths.expenses_file().exists());
        assert!(paths.income_file().exists());
        assert!(paths.backup_dir().exists());
    }

    #[test]
    fn test_second_run_keeps_existing_data() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());
        initialize_storage(&paths, &Settings::default()).unwrap();

        let categories = JsonTable::<Category>::new(paths.categories_file());
        categories.insert(Category::new("Rent", UserId::from_raw(1))).unwrap();
        categories.save().unwrap();

        assert!(!initialize_storage(&paths, &Settings::default()).unwrap());

        let reloaded = JsonTable::<Category>::new(paths.categories_file());
        reloaded.load().unwrap();
        assert_eq!(reloaded.count().unwrap(), 1);
    }
}
