//! Expense categories
//!
//! Categories group expenses for the per-category breakdown. Deleting a
//! category deletes its expenses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{CategoryId, UserId};
use crate::error::FieldError;

/// Longest accepted category name
pub const MAX_CATEGORY_NAME_LEN: usize = 255;

/// A spending category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,

    /// Category name, unique across all users
    pub name: String,

    /// The user who created the category
    pub owner: UserId,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    /// Create a new category; the id is assigned on insert
    pub fn new(name: impl Into<String>, owner: UserId) -> Self {
        let now = Utc::now();
        Self {
            id: CategoryId::from_raw(0),
            name: name.into().trim().to_string(),
            owner,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into().trim().to_string();
        self.updated_at = Utc::now();
    }

    /// Case-insensitive name match, used for lookups typed by a user
    pub fn matches_name(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name.trim())
    }

    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        if self.name.trim().is_empty() {
            errors.push(FieldError::new("name", "is required"));
        } else if self.name.chars().count() > MAX_CATEGORY_NAME_LEN {
            errors.push(FieldError::new(
                "name",
                format!("must be at most {} characters", MAX_CATEGORY_NAME_LEN),
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_category() {
        let category = Category::new(" Groceries ", UserId::from_raw(1));
        assert_eq!(category.name, "Groceries");
        assert_eq!(category.owner, UserId::from_raw(1));
        assert_eq!(category.to_string(), "Groceries");
    }

    #[test]
    fn test_matches_name_ignores_case() {
        let category = Category::new("Groceries", UserId::from_raw(1));
        assert!(category.matches_name("groceries"));
        assert!(category.matches_name(" GROCERIES "));
        assert!(!category.matches_name("Rent"));
    }

    #[test]
    fn test_validation() {
        let mut category = Category::new("Valid", UserId::from_raw(1));
        assert!(category.validate().is_ok());

        category.rename("   ");
        let errors = category.validate().unwrap_err();
        assert_eq!(errors[0].field, "name");

        category.rename("x".repeat(256));
        assert!(category.validate().is_err());
    }
}
