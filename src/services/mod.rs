//! Service layer for selavu
//!
//! Services validate input, enforce ownership through the session, write
//! through the storage layer and record every change in the audit log.

pub mod aggregate;
pub mod auth;
pub mod category;
pub mod expense;
pub mod income;
pub mod period;

pub use auth::{AuthService, Session};
pub use category::CategoryService;
pub use expense::{ExpenseChanges, ExpenseFilter, ExpenseService, NewExpense};
pub use income::{IncomeChanges, IncomeService, NewIncome};
pub use period::PeriodService;
