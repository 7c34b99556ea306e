//! Expense records

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{CategoryId, ExpenseId, UserId};
use super::money::Money;
use crate::error::FieldError;

/// Largest amount a record may hold (ten digits, two of them decimal)
pub const MAX_AMOUNT: Money = Money::from_cents(9_999_999_999);

/// Shared amount rule for expenses and income
pub(crate) fn validate_amount(amount: Money, errors: &mut Vec<FieldError>) {
    if amount.is_negative() {
        errors.push(FieldError::new("amount", "must not be negative"));
    } else if amount > MAX_AMOUNT {
        errors.push(FieldError::new(
            "amount",
            format!("must not exceed {}", MAX_AMOUNT),
        ));
    }
}

/// A single spending event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    pub category_id: CategoryId,
    pub date: NaiveDate,

    /// The user who recorded the expense
    pub owner: UserId,

    pub description: String,
    pub amount: Money,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Expense {
    /// Create a new expense; the id is assigned on insert
    pub fn new(
        owner: UserId,
        category_id: CategoryId,
        date: NaiveDate,
        amount: Money,
        description: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: ExpenseId::from_raw(0),
            category_id,
            date,
            owner,
            description: description.into().trim().to_string(),
            amount,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        if self.description.trim().is_empty() {
            errors.push(FieldError::new("description", "is required"));
        }
        validate_amount(self.amount, &mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} - {}", self.description, self.amount, self.date)
    }
}
