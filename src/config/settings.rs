//! User settings for selavu
//!
//! Settings are loaded once at startup and handed explicitly to the parts
//! that need them: the period service gets the billing cycle anchor, the
//! dashboard gets its titles and chart size, the backup manager gets the
//! retention policy.

use serde::{Deserialize, Serialize};

use super::paths::TrackerPaths;
use crate::error::TrackerError;

/// Default day of month a billing cycle starts on
pub const DEFAULT_CYCLE_START_DAY: u32 = 27;

/// Highest anchor day that exists in every month
pub const MAX_CYCLE_START_DAY: u32 = 28;

/// Backup retention settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupRetention {
    /// Number of daily backups to keep
    pub daily_count: u32,
    /// Number of monthly backups to keep
    pub monthly_count: u32,
}

impl Default for BackupRetention {
    fn default() -> Self {
        Self {
            daily_count: 30,
            monthly_count: 12,
        }
    }
}

/// Presentation settings for the dashboard report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSettings {
    #[serde(default = "default_header")]
    pub header: String,

    #[serde(default = "default_title")]
    pub title: String,

    /// Pie chart width handed to chart renderers
    #[serde(default = "default_chart_size")]
    pub chart_width: u32,

    /// Pie chart height handed to chart renderers
    #[serde(default = "default_chart_size")]
    pub chart_height: u32,
}

fn default_header() -> String {
    "Expense Tracker".to_string()
}

fn default_title() -> String {
    "Expense Dashboard".to_string()
}

fn default_chart_size() -> u32 {
    400
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            header: default_header(),
            title: default_title(),
            chart_width: default_chart_size(),
            chart_height: default_chart_size(),
        }
    }
}

/// User settings for selavu
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Day of month on which a billing cycle starts (1..=28)
    #[serde(default = "default_cycle_start_day")]
    pub cycle_start_day: u32,

    /// Currency symbol used in terminal output
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    #[serde(default)]
    pub backup_retention: BackupRetention,

    #[serde(default)]
    pub dashboard: DashboardSettings,
}

fn default_schema_version() -> u32 {
    1
}

fn default_cycle_start_day() -> u32 {
    DEFAULT_CYCLE_START_DAY
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            cycle_start_day: default_cycle_start_day(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            backup_retention: BackupRetention::default(),
            dashboard: DashboardSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &TrackerPaths) -> Result<Self, TrackerError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Don't save yet - let caller decide when to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| TrackerError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| TrackerError::Config(format!("Failed to parse settings file: {}", e)))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &TrackerPaths) -> Result<(), TrackerError> {
        self.validate()?;
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| TrackerError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| TrackerError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Reject values the rest of the program can't work with
    pub fn validate(&self) -> Result<(), TrackerError> {
        if !(1..=MAX_CYCLE_START_DAY).contains(&self.cycle_start_day) {
            return Err(TrackerError::Config(format!(
                "cycle_start_day must be between 1 and {}, got {}",
                MAX_CYCLE_START_DAY, self.cycle_start_day
            )));
        }
        if self.dashboard.chart_width == 0 || self.dashboard.chart_height == 0 {
            return Err(TrackerError::Config(
                "dashboard chart size must be non-zero".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.cycle_start_day, 27);
        assert_eq!(settings.dashboard.chart_width, 400);
        assert_eq!(settings.dashboard.header, "Expense Tracker");
        assert_eq!(settings.backup_retention.daily_count, 30);
        assert_eq!(settings.backup_retention.monthly_count, 12);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.cycle_start_day = 15;
        settings.currency_symbol = "€".into();
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.cycle_start_day, 15);
        assert_eq!(loaded.currency_symbol, "€");
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"currency_symbol": "£"}"#).unwrap();
        assert_eq!(settings.cycle_start_day, 27);
        assert_eq!(settings.dashboard.title, "Expense Dashboard");
        assert_eq!(settings.currency_symbol, "£");
    }

    #[test]
    fn test_cycle_day_out_of_range_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.cycle_start_day = 31;
        assert!(settings.save(&paths).is_err());

        settings.cycle_start_day = 0;
        assert!(matches!(settings.validate(), Err(TrackerError::Config(_))));
    }
}
