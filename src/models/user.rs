//! User accounts
//!
//! Every category, expense and income row belongs to exactly one user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::UserId;
use crate::error::FieldError;

/// Longest accepted username
pub const MAX_USERNAME_LEN: usize = 150;

/// A person who owns records
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,

    /// Login name, unique across the store
    pub username: String,

    /// Argon2 PHC string
    pub password_hash: String,

    /// Admins may run backups and read the audit log
    #[serde(default)]
    pub is_admin: bool,

    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a user; the id is assigned on insert
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            id: UserId::from_raw(0),
            username: username.into().trim().to_string(),
            password_hash: password_hash.into(),
            is_admin: false,
            created_at: Utc::now(),
        }
    }

    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        if self.username.is_empty() {
            errors.push(FieldError::new("username", "is required"));
        } else if self.username.chars().count() > MAX_USERNAME_LEN {
            errors.push(FieldError::new(
                "username",
                format!("must be at most {} characters", MAX_USERNAME_LEN),
            ));
        } else if self.username.chars().any(char::is_whitespace) {
            errors.push(FieldError::new("username", "must not contain spaces"));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_is_not_admin() {
        let user = User::new("  asha ", "hash");
        assert_eq!(user.username, "asha");
        assert!(!user.is_admin);
        assert!(user.validate().is_ok());
    }

    #[test]
    fn test_username_validation() {
        let user = User::new("", "hash");
        assert_eq!(user.validate().unwrap_err()[0].field, "username");

        let user = User::new("two words", "hash");
        assert!(user.validate().is_err());

        let user = User::new("a".repeat(151), "hash");
        assert!(user.validate().is_err());
    }
}
