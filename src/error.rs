//! Error types for selavu
//!
//! A single error enum covers every layer. Form-style validation failures
//! carry one entry per offending field so the CLI can report them the way
//! a web form would.

use std::fmt;

use thiserror::Error;

/// A validation failure attached to a single input field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Name of the field as the user knows it (e.g. "amount")
    pub field: &'static str,
    /// What is wrong with it
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// The main error type for selavu operations
#[derive(Error, Debug)]
pub enum TrackerError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// General validation errors (bad arguments, bad period strings)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Field-by-field form validation errors
    #[error("Invalid input: {}", format_fields(.0))]
    Form(Vec<FieldError>),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// Authentication failed
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// The session user may not perform this operation
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Backup/copy errors
    #[error("Backup error: {0}")]
    Backup(String),
}

fn format_fields(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl TrackerError {
    /// Create a "not found" error for categories
    pub fn category_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Category",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for expenses
    pub fn expense_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Expense",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for income entries
    pub fn income_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Income",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for users
    pub fn user_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "User",
            identifier: identifier.into(),
        }
    }

    /// Single-field form error
    pub fn field(field: &'static str, message: impl Into<String>) -> Self {
        Self::Form(vec![FieldError::new(field, message)])
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error (general or per-field)
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Form(_))
    }

    /// Field errors, if this is a form error
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            Self::Form(fields) => fields,
            _ => &[],
        }
    }
}

impl From<std::io::Error> for TrackerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for TrackerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<Vec<FieldError>> for TrackerError {
    fn from(fields: Vec<FieldError>) -> Self {
        Self::Form(fields)
    }
}

/// Result type alias for selavu operations
pub type TrackerResult<T> = Result<T, TrackerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TrackerError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = TrackerError::expense_not_found("exp-12");
        assert_eq!(err.to_string(), "Expense not found: exp-12");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_form_error_lists_every_field() {
        let err = TrackerError::Form(vec![
            FieldError::new("amount", "must not be negative"),
            FieldError::new("description", "is required"),
        ]);
        assert_eq!(
            err.to_string(),
            "Invalid input: amount: must not be negative; description: is required"
        );
        assert!(err.is_validation());
        assert_eq!(err.field_errors().len(), 2);
        assert_eq!(err.field_errors()[1].field, "description");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: TrackerError = io_err.into();
        assert!(matches!(err, TrackerError::Io(_)));
    }
}
