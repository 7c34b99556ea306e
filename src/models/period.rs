//! Billing period representation
//!
//! A billing cycle runs from an anchor day of one month (the 27th by
//! default) up to the day before the anchor in the following month. Any
//! inclusive date range can also be used as a reporting period.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::settings::{DEFAULT_CYCLE_START_DAY, MAX_CYCLE_START_DAY};

/// A reporting period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum BillingPeriod {
    /// The billing cycle that starts on `anchor_day` of `year`-`month`
    Cycle {
        year: i32,
        month: u32,
        anchor_day: u32,
    },

    /// An explicit inclusive date range
    Custom { start: NaiveDate, end: NaiveDate },
}

/// The default billing period containing `today`, as `(start, end)`
///
/// `2025-03-15` gives `(2025-02-27, 2025-03-26)`, `2025-03-27` gives
/// `(2025-03-27, 2025-04-26)`.
pub fn current_billing_period(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let period = BillingPeriod::containing(today, DEFAULT_CYCLE_START_DAY);
    (period.start_date(), period.end_date())
}

/// Move `(year, month)` by `delta` months, rolling the year over
///
/// Saturates at the ends of the `i32` year range.
fn shift_month(year: i32, month: u32, delta: i32) -> (i32, u32) {
    let zero_based = i64::from(year) * 12 + (i64::from(month) - 1) + i64::from(delta);
    let year = i32::try_from(zero_based.div_euclid(12))
        .unwrap_or(if zero_based < 0 { i32::MIN } else { i32::MAX });
    (year, zero_based.rem_euclid(12) as u32 + 1)
}

/// Anchor day clamped to a day that exists in every month
fn clamp_anchor(anchor_day: u32) -> u32 {
    anchor_day.clamp(1, MAX_CYCLE_START_DAY)
}

impl BillingPeriod {
    /// The cycle starting in the given month
    pub fn cycle(year: i32, month: u32, anchor_day: u32) -> Self {
        Self::Cycle {
            year,
            month,
            anchor_day: clamp_anchor(anchor_day),
        }
    }

    /// The cycle starting in the given month, if both of its ends are
    /// representable dates
    pub fn try_cycle(year: i32, month: u32, anchor_day: u32) -> Result<Self, PeriodParseError> {
        let (next_year, next_month) = shift_month(year, month, 1);
        let next_start = cycle_start(next_year, next_month, anchor_day);
        match (cycle_start(year, month, anchor_day), next_start) {
            (Some(_), Some(next)) if next.pred_opt().is_some() => {
                Ok(Self::cycle(year, month, anchor_day))
            }
            _ => Err(PeriodParseError::OutOfRange(year)),
        }
    }

    /// An explicit date range; `start` must not be after `end`
    pub fn custom(start: NaiveDate, end: NaiveDate) -> Result<Self, PeriodParseError> {
        if start > end {
            return Err(PeriodParseError::InvertedRange { start, end });
        }
        Ok(Self::Custom { start, end })
    }

    /// The cycle that contains `date`
    ///
    /// On or after the anchor day the cycle started this month, before it
    /// the cycle started in the previous month.
    pub fn containing(date: NaiveDate, anchor_day: u32) -> Self {
        let anchor_day = clamp_anchor(anchor_day);
        let (year, month) = if date.day() >= anchor_day {
            (date.year(), date.month())
        } else {
            shift_month(date.year(), date.month(), -1)
        };
        Self::Cycle {
            year,
            month,
            anchor_day,
        }
    }

    /// First day of the period (inclusive)
    pub fn start_date(&self) -> NaiveDate {
        match *self {
            Self::Cycle {
                year,
                month,
                anchor_day,
            } => cycle_start(year, month, anchor_day).unwrap_or(if year < 0 {
                NaiveDate::MIN
            } else {
                NaiveDate::MAX
            }),
            Self::Custom { start, .. } => start,
        }
    }

    /// Last day of the period (inclusive)
    ///
    /// Cycles outside chrono's date range saturate at its ends.
    pub fn end_date(&self) -> NaiveDate {
        match *self {
            Self::Cycle {
                year,
                month,
                anchor_day,
            } => {
                let (next_year, next_month) = shift_month(year, month, 1);
                cycle_start(next_year, next_month, anchor_day)
                    .and_then(|next| next.pred_opt())
                    .unwrap_or(if year < 0 {
                        NaiveDate::MIN
                    } else {
                        NaiveDate::MAX
                    })
            }
            Self::Custom { end, .. } => end,
        }
    }

    /// Check if a date falls within this period (both ends inclusive)
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date() && date <= self.end_date()
    }

    /// Number of days covered
    pub fn days(&self) -> i64 {
        (self.end_date() - self.start_date()).num_days() + 1
    }

    /// The following period of the same kind
    pub fn next(&self) -> Self {
        match *self {
            Self::Cycle {
                year,
                month,
                anchor_day,
            } => {
                let (year, month) = shift_month(year, month, 1);
                Self::Cycle {
                    year,
                    month,
                    anchor_day,
                }
            }
            Self::Custom { start, end } => {
                let length = end - start;
                let start = end.succ_opt().unwrap_or(NaiveDate::MAX);
                Self::Custom {
                    start,
                    end: start.checked_add_signed(length).unwrap_or(NaiveDate::MAX),
                }
            }
        }
    }

    /// The preceding period of the same kind
    pub fn prev(&self) -> Self {
        match *self {
            Self::Cycle {
                year,
                month,
                anchor_day,
            } => {
                let (year, month) = shift_month(year, month, -1);
                Self::Cycle {
                    year,
                    month,
                    anchor_day,
                }
            }
            Self::Custom { start, end } => {
                let length = end - start;
                let end = start.pred_opt().unwrap_or(NaiveDate::MIN);
                Self::Custom {
                    start: end.checked_sub_signed(length).unwrap_or(NaiveDate::MIN),
                    end,
                }
            }
        }
    }

    /// Parse a period string
    ///
    /// Formats:
    /// - Cycle: "2025-02" (the cycle starting on the anchor day of Feb 2025)
    /// - Range: "2025-02-01..2025-02-14"
    pub fn parse(s: &str, anchor_day: u32) -> Result<Self, PeriodParseError> {
        let s = s.trim();
        let invalid = || PeriodParseError::InvalidFormat(s.to_string());

        if let Some((start, end)) = s.split_once("..") {
            let start = NaiveDate::parse_from_str(start.trim(), "%Y-%m-%d").map_err(|_| invalid())?;
            let end = NaiveDate::parse_from_str(end.trim(), "%Y-%m-%d").map_err(|_| invalid())?;
            return Self::custom(start, end);
        }

        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        if !(1..=12).contains(&month) {
            return Err(PeriodParseError::InvalidMonth(month));
        }

        Self::try_cycle(year, month, anchor_day)
    }
}

/// `None` when the year is outside chrono's range
fn cycle_start(year: i32, month: u32, anchor_day: u32) -> Option<NaiveDate> {
    // anchor_day <= 28 exists in every month
    NaiveDate::from_ymd_opt(year, month, clamp_anchor(anchor_day))
}

impl fmt::Display for BillingPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}..{}",
            self.start_date().format("%Y-%m-%d"),
            self.end_date().format("%Y-%m-%d")
        )
    }
}

impl Ord for BillingPeriod {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.start_date()
            .cmp(&other.start_date())
            .then(self.end_date().cmp(&other.end_date()))
    }
}

impl PartialOrd for BillingPeriod {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Error type for period parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodParseError {
    InvalidFormat(String),
    InvalidMonth(u32),
    InvertedRange { start: NaiveDate, end: NaiveDate },
    OutOfRange(i32),
}

impl fmt::Display for PeriodParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFormat(s) => write!(f, "Invalid period format: {}", s),
            Self::InvalidMonth(m) => write!(f, "Invalid month: {}", m),
            Self::InvertedRange { start, end } => {
                write!(f, "Period start {} is after its end {}", start, end)
            }
            Self::OutOfRange(year) => write!(f, "Year out of range: {}", year),
        }
    }
}

impl std::error::Error for PeriodParseError {}
