//! Billing period service
//!
//! Resolves period strings typed on the command line against the
//! configured cycle anchor and a notion of "today".

use chrono::{Local, NaiveDate};

use crate::config::settings::Settings;
use crate::error::{TrackerError, TrackerResult};
use crate::models::BillingPeriod;

/// Most cycles `recent_periods` returns (ten years)
pub const MAX_RECENT_PERIODS: usize = 120;

/// Service for billing period lookups
pub struct PeriodService<'a> {
    settings: &'a Settings,
    today: NaiveDate,
}

impl<'a> PeriodService<'a> {
    /// Period service anchored at the local date
    pub fn new(settings: &'a Settings) -> Self {
        Self::at(settings, Local::now().date_naive())
    }

    /// Period service with an explicit "today"
    pub fn at(settings: &'a Settings, today: NaiveDate) -> Self {
        Self { settings, today }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// The billing cycle containing today
    pub fn current_period(&self) -> BillingPeriod {
        self.period_for_date(self.today)
    }

    /// The billing cycle containing `date`
    pub fn period_for_date(&self, date: NaiveDate) -> BillingPeriod {
        BillingPeriod::containing(date, self.settings.cycle_start_day)
    }

    /// Parse a period string, defaulting to the current cycle
    pub fn parse_or_current(&self, period_str: Option<&str>) -> TrackerResult<BillingPeriod> {
        match period_str {
            Some(s) => self.parse(s),
            None => Ok(self.current_period()),
        }
    }

    /// Parse a period string
    ///
    /// Formats supported:
    /// - Relative: "current", "last" (or "prev"), "next"
    /// - Cycle: "2025-02" (the cycle starting in Feb 2025)
    /// - Date range: "2025-01-01..2025-01-14"
    pub fn parse(&self, s: &str) -> TrackerResult<BillingPeriod> {
        match s.trim().to_lowercase().as_str() {
            "current" | "now" | "this" => return Ok(self.current_period()),
            "last" | "prev" | "previous" => return Ok(self.current_period().prev()),
            "next" => return Ok(self.current_period().next()),
            _ => {}
        }

        BillingPeriod::parse(s, self.settings.cycle_start_day)
            .map_err(|e| TrackerError::Validation(e.to_string()))
    }

    /// The last `count` cycles up to and including the current one,
    /// oldest first; at most `MAX_RECENT_PERIODS`
    pub fn recent_periods(&self, count: usize) -> Vec<BillingPeriod> {
        let mut periods: Vec<_> =
            std::iter::successors(Some(self.current_period()), |p| Some(p.prev()))
                .take(count.min(MAX_RECENT_PERIODS))
                .collect();
        periods.reverse();
        periods
    }
}
