//! selavu - personal expense and income tracker
//!
//! Records expenses and income per user and reports them over billing
//! cycles that run from the 27th of one month to the 26th of the next.
//!
//! # Architecture
//!
//! - `config`: Paths and settings
//! - `error`: Error types
//! - `models`: Users, categories, expenses, income, money and periods
//! - `storage`: JSON table storage
//! - `services`: Business logic, scoped to an authenticated session
//! - `reports`: Dashboard report
//! - `audit`: Audit logging
//! - `backup`: Snapshots and database copies
//! - `cli` / `display`: Command handlers and terminal formatting
//!
//! # Example
//!
//! ```rust,ignore
//! use selavu::config::{paths::TrackerPaths, settings::Settings};
//! use selavu::storage::Storage;
//!
//! let paths = TrackerPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::open(paths)?;
//! ```

pub mod audit;
pub mod backup;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{TrackerError, TrackerResult};
