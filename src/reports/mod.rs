//! Reports module for selavu

pub mod dashboard;

pub use dashboard::{ChartData, DashboardReport};
