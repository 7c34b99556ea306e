//! Core data models for selavu
//!
//! Users own categories, expenses and income entries. Billing periods are
//! the default reporting window for everything else.

pub mod category;
pub mod expense;
pub mod ids;
pub mod income;
pub mod money;
pub mod period;
pub mod user;

pub use category::Category;
pub use expense::Expense;
pub use ids::{CategoryId, ExpenseId, IncomeId, UserId};
pub use income::{Income, IncomeSource};
pub use money::Money;
pub use period::{current_billing_period, BillingPeriod, PeriodParseError};
pub use user::User;
