//! Income records
//!
//! Income entries are tagged with where the money came from. The stored
//! spelling of each source is fixed (`"Salary"`, `"equity"`, `"Allowance"`,
//! `"Other"`) so existing data files stay readable.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::expense::validate_amount;
use super::ids::{IncomeId, UserId};
use super::money::Money;
use crate::error::FieldError;

/// Where an income entry came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum IncomeSource {
    #[default]
    #[serde(rename = "Salary")]
    Salary,
    #[serde(rename = "equity")]
    Equity,
    #[serde(rename = "Allowance")]
    Allowance,
    #[serde(rename = "Other")]
    Other,
}

impl IncomeSource {
    pub fn all() -> &'static [Self] {
        &[Self::Salary, Self::Equity, Self::Allowance, Self::Other]
    }

    /// The stored spelling
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Salary => "Salary",
            Self::Equity => "equity",
            Self::Allowance => "Allowance",
            Self::Other => "Other",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Salary => "Salary",
            Self::Equity => "Equity",
            Self::Allowance => "Allowance",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for IncomeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for IncomeSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::all()
            .iter()
            .copied()
            .find(|source| source.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                format!(
                    "unknown income source '{}' (expected one of: salary, equity, allowance, other)",
                    s
                )
            })
    }
}

/// A single income event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Income {
    pub id: IncomeId,

    #[serde(default)]
    pub source: IncomeSource,

    #[serde(default)]
    pub description: Option<String>,

    pub amount: Money,
    pub date: NaiveDate,

    /// The user who received the income
    pub owner: UserId,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Income {
    /// Create a new income entry; the id is assigned on insert
    pub fn new(owner: UserId, source: IncomeSource, amount: Money, date: NaiveDate) -> Self {
        let now = Utc::now();
        Self {
            id: IncomeId::from_raw(0),
            source,
            description: None,
            amount,
            date,
            owner,
            created_at: now,
            updated_at: now,
        }
    }

    /// Set the description; blank text clears it
    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());
        self.updated_at = Utc::now();
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        validate_amount(self.amount, &mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl fmt::Display for Income {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.source, self.amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
    }

    #[test]
    fn test_source_stored_spelling() {
        assert_eq!(
            serde_json::to_string(&IncomeSource::Equity).unwrap(),
            "\"equity\""
        );
        assert_eq!(
            serde_json::to_string(&IncomeSource::Salary).unwrap(),
            "\"Salary\""
        );
        let back: IncomeSource = serde_json::from_str("\"Allowance\"").unwrap();
        assert_eq!(back, IncomeSource::Allowance);
    }

    #[test]
    fn test_source_parse_ignores_case() {
        assert_eq!("EQUITY".parse::<IncomeSource>().unwrap(), IncomeSource::Equity);
        assert_eq!("other".parse::<IncomeSource>().unwrap(), IncomeSource::Other);
        assert!("lottery".parse::<IncomeSource>().is_err());
        assert_eq!(IncomeSource::default(), IncomeSource::Salary);
    }

    #[test]
    fn test_source_defaults_when_missing() {
        let json = r#"{"id":1,"amount":1000,"date":"2025-03-01","owner":1,
            "created_at":"2025-03-01T00:00:00Z","updated_at":"2025-03-01T00:00:00Z"}"#;
        let income: Income = serde_json::from_str(json).unwrap();
        assert_eq!(income.source, IncomeSource::Salary);
        assert!(income.description.is_none());
    }

    #[test]
    fn test_blank_description_is_cleared() {
        let mut income = Income::new(UserId::from_raw(1), IncomeSource::Other, Money::from_cents(100), date());
        income.set_description(Some("  ".into()));
        assert!(income.description.is_none());
        income.set_description(Some(" bonus ".into()));
        assert_eq!(income.description.as_deref(), Some("bonus"));
    }

    #[test]
    fn test_negative_amount_rejected() {
        let income = Income::new(UserId::from_raw(1), IncomeSource::Salary, Money::from_cents(-5), date());
        assert_eq!(income.validate().unwrap_err()[0].field, "amount");
    }
}
