//! Billing period CLI commands

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::error::TrackerResult;
use crate::models::BillingPeriod;
use crate::services::PeriodService;

/// Period subcommands
#[derive(Subcommand)]
pub enum PeriodCommands {
    /// Show the billing period containing today
    Current,

    /// Show a specific period
    Show {
        /// "current", "last", "next", "2025-02" or "2025-01-01..2025-01-31"
        period: String,
    },

    /// List recent billing periods
    List {
        /// Number of periods to show (at most 120)
        #[arg(short = 'n', long, default_value = "6")]
        count: usize,
    },
}

fn format_period(period: &BillingPeriod, date_format: &str) -> String {
    format!(
        "{} to {} ({} days)",
        period.start_date().format(date_format),
        period.end_date().format(date_format),
        period.days()
    )
}

/// Handle a period command
pub fn handle_period_command(settings: &Settings, cmd: PeriodCommands) -> TrackerResult<()> {
    let service = PeriodService::new(settings);
    let date_format = settings.date_format.as_str();

    match cmd {
        PeriodCommands::Current => {
            let period = service.current_period();
            println!("Current billing period: {}", period);
            println!("  {}", format_period(&period, date_format));
        }

        PeriodCommands::Show { period } => {
            let period = service.parse(&period)?;
            println!("Period: {}", period);
            println!("  {}", format_period(&period, date_format));
        }

        PeriodCommands::List { count } => {
            let current = service.current_period();
            for period in service.recent_periods(count) {
                let marker = if period == current { "  <- current" } else { "" };
                println!("{}{}", format_period(&period, date_format), marker);
            }
        }
    }

    Ok(())
}
