//! Category service
//!
//! Category names are unique across all users. Lookups by name only see
//! the session user's categories.

use tracing::{info, warn};

use super::auth::Session;
use crate::audit::EntityType;
use crate::error::{TrackerError, TrackerResult};
use crate::models::{Category, CategoryId, Expense};
use crate::storage::Storage;

/// Service for category management
pub struct CategoryService<'a> {
    storage: &'a Storage,
    session: &'a Session,
}

impl<'a> CategoryService<'a> {
    pub fn new(storage: &'a Storage, session: &'a Session) -> Self {
        Self { storage, session }
    }

    fn check_name_free(&self, name: &str, except: Option<CategoryId>) -> TrackerResult<()> {
        let taken = self
            .storage
            .categories
            .find(|c| c.matches_name(name) && Some(c.id) != except)?;
        match taken {
            Some(existing) => Err(TrackerError::Duplicate {
                entity_type: "Category",
                identifier: existing.name,
            }),
            None => Ok(()),
        }
    }

    /// Create a new category owned by the session user
    pub fn create(&self, name: &str) -> TrackerResult<Category> {
        let category = Category::new(name, self.session.user_id());
        category.validate()?;
        self.check_name_free(&category.name, None)?;

        let category = self.storage.categories.insert(category)?;
        self.storage.categories.save()?;

        self.storage.log_create(
            self.session.actor(),
            EntityType::Category,
            category.id.to_string(),
            Some(category.name.clone()),
            &category,
        )?;
        info!(id = %category.id, name = %category.name, "category created");

        Ok(category)
    }

    /// The session user's categories, by name
    pub fn list(&self) -> TrackerResult<Vec<Category>> {
        let mut categories = self.storage.categories.owned_by(self.session.user_id())?;
        categories.sort_by_key(|c| c.name.to_lowercase());
        Ok(categories)
    }

    pub fn get(&self, id: CategoryId) -> TrackerResult<Category> {
        self.storage
            .categories
            .get_owned(id, self.session.user_id())?
            .ok_or_else(|| TrackerError::category_not_found(id.to_string()))
    }

    /// Find a category by name (case-insensitive) or by id
    pub fn find(&self, identifier: &str) -> TrackerResult<Category> {
        let owner = self.session.user_id();
        if let Some(category) = self
            .storage
            .categories
            .find(|c| c.owner == owner && c.matches_name(identifier))?
        {
            return Ok(category);
        }

        if let Ok(id) = identifier.parse::<CategoryId>() {
            if let Some(category) = self.storage.categories.get_owned(id, owner)? {
                return Ok(category);
            }
        }

        Err(TrackerError::category_not_found(identifier.trim()))
    }

    pub fn rename(&self, id: CategoryId, name: &str) -> TrackerResult<Category> {
        let before = self.get(id)?;
        let mut category = before.clone();
        category.rename(name);
        category.validate()?;
        self.check_name_free(&category.name, Some(id))?;

        self.storage.categories.update(category.clone())?;
        self.storage.categories.save()?;

        self.storage.log_update(
            self.session.actor(),
            EntityType::Category,
            category.id.to_string(),
            Some(category.name.clone()),
            &before,
            &category,
        )?;

        Ok(category)
    }

    /// Number of expenses filed under a category
    pub fn expense_count(&self, id: CategoryId) -> TrackerResult<usize> {
        Ok(self
            .storage
            .expenses
            .filter(|e| e.category_id == id)?
            .len())
    }

    /// Delete a category together with all of its expenses
    ///
    /// Returns the removed category and expenses. The category file is
    /// written first; if the expense file then fails to save, the error
    /// says the category is already gone.
    pub fn delete(&self, id: CategoryId) -> TrackerResult<(Category, Vec<Expense>)> {
        let category = self.get(id)?;

        let removed = self.storage.expenses.delete_where(|e| e.category_id == id)?;
        self.storage.categories.delete(id)?;
        self.storage.categories.save()?;
        self.storage.expenses.save().map_err(|e| {
            warn!(id = %category.id, error = %e, "category deleted but expenses not saved");
            TrackerError::Storage(format!(
                "Category '{}' was deleted but its {} expense(s) could not be removed: {}",
                category.name,
                removed.len(),
                e
            ))
        })?;

        for expense in &removed {
            self.storage.log_delete(
                self.session.actor(),
                EntityType::Expense,
                expense.id.to_string(),
                Some(expense.description.clone()),
                expense,
            )?;
        }
        self.storage.log_delete(
            self.session.actor(),
            EntityType::Category,
            category.id.to_string(),
            Some(category.name.clone()),
            &category,
        )?;
        info!(
            id = %category.id,
            expenses = removed.len(),
            "category deleted"
        );

        Ok((category, removed))
    }
}
