//! Configuration module for selavu
//!
//! - Data directory resolution
//! - Settings persistence (billing cycle, dashboard, backups)

pub mod paths;
pub mod settings;

pub use paths::TrackerPaths;
pub use settings::Settings;
