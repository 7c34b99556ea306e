//! Expense service
//!
//! Create, edit, list and delete the session user's expenses.

use chrono::{Local, NaiveDate};
use tracing::info;

use super::auth::Session;
use crate::audit::EntityType;
use crate::error::{TrackerError, TrackerResult};
use crate::models::{BillingPeriod, CategoryId, Expense, ExpenseId, Money};
use crate::storage::Storage;

/// Input for a new expense
#[derive(Debug, Clone)]
pub struct NewExpense {
    pub category_id: CategoryId,
    /// Defaults to today
    pub date: Option<NaiveDate>,
    pub amount: Money,
    pub description: String,
}

/// Fields to change on an existing expense; `None` leaves a field alone
#[derive(Debug, Clone, Default)]
pub struct ExpenseChanges {
    pub category_id: Option<CategoryId>,
    pub date: Option<NaiveDate>,
    pub amount: Option<Money>,
    pub description: Option<String>,
}

impl ExpenseChanges {
    pub fn is_empty(&self) -> bool {
        self.category_id.is_none()
            && self.date.is_none()
            && self.amount.is_none()
            && self.description.is_none()
    }
}

/// Which expenses to list
#[derive(Debug, Clone, Default)]
pub struct ExpenseFilter {
    pub period: Option<BillingPeriod>,
    pub category_id: Option<CategoryId>,
}

/// Service for expense management
pub struct ExpenseService<'a> {
    storage: &'a Storage,
    session: &'a Session,
}

impl<'a> ExpenseService<'a> {
    pub fn new(storage: &'a Storage, session: &'a Session) -> Self {
        Self { storage, session }
    }

    /// The category must exist and belong to the session user
    fn check_category(&self, id: CategoryId) -> TrackerResult<()> {
        match self.storage.categories.get_owned(id, self.session.user_id())? {
            Some(_) => Ok(()),
            None => Err(TrackerError::category_not_found(id.to_string())),
        }
    }

    pub fn create(&self, input: NewExpense) -> TrackerResult<Expense> {
        self.check_category(input.category_id)?;

        let expense = Expense::new(
            self.session.user_id(),
            input.category_id,
            input.date.unwrap_or_else(|| Local::now().date_naive()),
            input.amount,
            input.description,
        );
        expense.validate()?;

        let expense = self.storage.expenses.insert(expense)?;
        self.storage.expenses.save()?;

        self.storage.log_create(
            self.session.actor(),
            EntityType::Expense,
            expense.id.to_string(),
            Some(expense.description.clone()),
            &expense,
        )?;
        info!(id = %expense.id, amount = %expense.amount, "expense recorded");

        Ok(expense)
    }

    pub fn get(&self, id: ExpenseId) -> TrackerResult<Expense> {
        self.storage
            .expenses
            .get_owned(id, self.session.user_id())?
            .ok_or_else(|| TrackerError::expense_not_found(id.to_string()))
    }

    /// Matching expenses, newest first
    pub fn list(&self, filter: &ExpenseFilter) -> TrackerResult<Vec<Expense>> {
        let owner = self.session.user_id();
        let mut expenses = self.storage.expenses.filter(|e| {
            e.owner == owner
                && filter.period.map_or(true, |p| p.contains(e.date))
                && filter.category_id.map_or(true, |c| e.category_id == c)
        })?;
        expenses.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        Ok(expenses)
    }

    pub fn update(&self, id: ExpenseId, changes: ExpenseChanges) -> TrackerResult<Expense> {
        let before = self.get(id)?;
        let mut expense = before.clone();

        if let Some(category_id) = changes.category_id {
            self.check_category(category_id)?;
            expense.category_id = category_id;
        }
        if let Some(date) = changes.date {
            expense.date = date;
        }
        if let Some(amount) = changes.amount {
            expense.amount = amount;
        }
        if let Some(description) = changes.description {
            expense.description = description.trim().to_string();
        }
        expense.validate()?;
        expense.touch();

        self.storage.expenses.update(expense.clone())?;
        self.storage.expenses.save()?;

        self.storage.log_update(
            self.session.actor(),
            EntityType::Expense,
            expense.id.to_string(),
            Some(expense.description.clone()),
            &before,
            &expense,
        )?;

        Ok(expense)
    }

    pub fn delete(&self, id: ExpenseId) -> TrackerResult<Expense> {
        let expense = self.get(id)?;
        self.storage.expenses.delete(id)?;
        self.storage.expenses.save()?;

        self.storage.log_delete(
            self.session.actor(),
            EntityType::Expense,
            expense.id.to_string(),
            Some(expense.description.clone()),
            &expense,
        )?;
        info!(id = %expense.id, "expense deleted");

        Ok(expense)
    }
}
