//! CLI command handlers
//!
//! Bridges clap argument parsing with the service layer. Handlers print
//! their results and return errors for `main` to report.

pub mod audit;
pub mod backup;
pub mod category;
pub mod dashboard;
pub mod expense;
pub mod income;
pub mod period;
pub mod session;
pub mod user;

pub use audit::{handle_audit_command, AuditArgs};
pub use backup::{handle_backup_command, BackupCommands};
pub use category::{handle_category_command, CategoryCommands};
pub use dashboard::{handle_dashboard_command, DashboardArgs};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use income::{handle_income_command, IncomeCommands};
pub use period::{handle_period_command, PeriodCommands};
pub use session::open_session;
pub use user::{handle_admin_command, handle_user_command, AdminCommands, UserCommands};

use chrono::NaiveDate;

use crate::error::{TrackerError, TrackerResult};
use crate::models::Money;

/// Parse a YYYY-MM-DD argument
pub(crate) fn parse_date(field: &'static str, value: &str) -> TrackerResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| TrackerError::field(field, format!("expected YYYY-MM-DD, got '{}'", value)))
}

/// Parse an amount argument such as "12.50"
pub(crate) fn parse_amount(value: &str) -> TrackerResult<Money> {
    Money::parse(value).map_err(|e| TrackerError::field("amount", e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("date", "2025-03-27").unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 27).unwrap()
        );
        let err = parse_date("date", "27/03/2025").unwrap_err();
        assert_eq!(err.field_errors()[0].field, "date");
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("12.5").unwrap(), Money::from_cents(1250));
        let err = parse_amount("twelve").unwrap_err();
        assert_eq!(err.field_errors()[0].field, "amount");
    }
}
