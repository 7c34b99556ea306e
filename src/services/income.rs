//! Income service
//!
//! Create, edit, list and delete the session user's income entries.

use chrono::{Local, NaiveDate};
use tracing::info;

use super::auth::Session;
use crate::audit::EntityType;
use crate::error::{TrackerError, TrackerResult};
use crate::models::{BillingPeriod, Income, IncomeId, IncomeSource, Money};
use crate::storage::Storage;

/// Input for a new income entry
#[derive(Debug, Clone)]
pub struct NewIncome {
    pub source: IncomeSource,
    pub amount: Money,
    /// Defaults to today
    pub date: Option<NaiveDate>,
    pub description: Option<String>,
}

/// Fields to change on an existing entry; `None` leaves a field alone
///
/// `description: Some(None)` clears the description.
#[derive(Debug, Clone, Default)]
pub struct IncomeChanges {
    pub source: Option<IncomeSource>,
    pub amount: Option<Money>,
    pub date: Option<NaiveDate>,
    pub description: Option<Option<String>>,
}

impl IncomeChanges {
    pub fn is_empty(&self) -> bool {
        self.source.is_none()
            && self.amount.is_none()
            && self.date.is_none()
            && self.description.is_none()
    }
}

/// Service for income management
pub struct IncomeService<'a> {
    storage: &'a Storage,
    session: &'a Session,
}

impl<'a> IncomeService<'a> {
    pub fn new(storage: &'a Storage, session: &'a Session) -> Self {
        Self { storage, session }
    }

    pub fn create(&self, input: NewIncome) -> TrackerResult<Income> {
        let mut income = Income::new(
            self.session.user_id(),
            input.source,
            input.amount,
            input.date.unwrap_or_else(|| Local::now().date_naive()),
        );
        income.set_description(input.description);
        income.validate()?;

        let income = self.storage.income.insert(income)?;
        self.storage.income.save()?;

        self.storage.log_create(
            self.session.actor(),
            EntityType::Income,
            income.id.to_string(),
            Some(income.source.label().to_string()),
            &income,
        )?;
        info!(id = %income.id, amount = %income.amount, "income recorded");

        Ok(income)
    }

    pub fn get(&self, id: IncomeId) -> TrackerResult<Income> {
        self.storage
            .income
            .get_owned(id, self.session.user_id())?
            .ok_or_else(|| TrackerError::income_not_found(id.to_string()))
    }

    /// Entries in `period` (all when `None`), newest first
    pub fn list(&self, period: Option<BillingPeriod>) -> TrackerResult<Vec<Income>> {
        let owner = self.session.user_id();
        let mut income = self
            .storage
            .income
            .filter(|i| i.owner == owner && period.map_or(true, |p| p.contains(i.date)))?;
        income.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        Ok(income)
    }

    pub fn update(&self, id: IncomeId, changes: IncomeChanges) -> TrackerResult<Income> {
        let before = self.get(id)?;
        let mut income = before.clone();

        if let Some(source) = changes.source {
            income.source = source;
        }
        if let Some(amount) = changes.amount {
            income.amount = amount;
        }
        if let Some(date) = changes.date {
            income.date = date;
        }
        if let Some(description) = changes.description {
            income.set_description(description);
        }
        income.validate()?;
        income.touch();

        self.storage.income.update(income.clone())?;
        self.storage.income.save()?;

        self.storage.log_update(
            self.session.actor(),
            EntityType::Income,
            income.id.to_string(),
            Some(income.source.label().to_string()),
            &before,
            &income,
        )?;

        Ok(income)
    }

    pub fn delete(&self, id: IncomeId) -> TrackerResult<Income> {
        let income = self.get(id)?;
        self.storage.income.delete(id)?;
        self.storage.income.save()?;

        self.storage.log_delete(
            self.session.actor(),
            EntityType::Income,
            income.id.to_string(),
            Some(income.source.label().to_string()),
            &income,
        )?;
        info!(id = %income.id, "income deleted");

        Ok(income)
    }
}
