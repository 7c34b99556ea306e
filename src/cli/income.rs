//! Income CLI commands

use clap::Subcommand;

use super::{parse_amount, parse_date};
use crate::config::settings::Settings;
use crate::display::income::{format_income_details, format_income_list};
use crate::error::{TrackerError, TrackerResult};
use crate::models::{IncomeId, IncomeSource};
use crate::services::{IncomeChanges, IncomeService, NewIncome, PeriodService, Session};
use crate::storage::Storage;

/// Income subcommands
#[derive(Subcommand)]
pub enum IncomeCommands {
    /// List income (defaults to the current billing period)
    List {
        /// Period: "current", "last", "2025-02" or "2025-01-01..2025-01-31"
        #[arg(short, long)]
        period: Option<String>,
        /// Ignore the period and list everything
        #[arg(long, conflicts_with = "period")]
        all: bool,
    },

    /// Record income
    Add {
        /// Amount (e.g. "2500.00")
        amount: String,
        /// Source: salary, equity, allowance or other
        #[arg(short, long, default_value = "salary")]
        source: IncomeSource,
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Optional note
        #[arg(long)]
        description: Option<String>,
    },

    /// Show income details
    Show {
        /// Income ID
        id: String,
    },

    /// Edit an income entry
    Edit {
        /// Income ID
        id: String,
        /// New source
        #[arg(short, long)]
        source: Option<IncomeSource>,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
        /// New date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
        /// New description
        #[arg(long, conflicts_with = "clear_description")]
        description: Option<String>,
        /// Remove the description
        #[arg(long)]
        clear_description: bool,
    },

    /// Delete an income entry
    Delete {
        /// Income ID
        id: String,
    },
}

fn parse_id(id: &str) -> TrackerResult<IncomeId> {
    id.parse()
        .map_err(|_| TrackerError::income_not_found(id.trim()))
}

/// Handle an income command
pub fn handle_income_command(
    storage: &Storage,
    settings: &Settings,
    session: &Session,
    cmd: IncomeCommands,
) -> TrackerResult<()> {
    let service = IncomeService::new(storage, session);
    let currency = settings.currency_symbol.as_str();

    match cmd {
        IncomeCommands::List { period, all } => {
            let period = if all {
                None
            } else {
                Some(PeriodService::new(settings).parse_or_current(period.as_deref())?)
            };

            if let Some(period) = period {
                println!("Period: {}", period);
                println!();
            }
            print!("{}", format_income_list(&service.list(period)?, currency));
        }

        IncomeCommands::Add {
            amount,
            source,
            date,
            description,
        } => {
            let income = service.create(NewIncome {
                source,
                amount: parse_amount(&amount)?,
                date: date.as_deref().map(|d| parse_date("date", d)).transpose()?,
                description,
            })?;

            println!("Recorded income: {}", income.source);
            println!("  ID:     {}", income.id);
            println!("  Amount: {}", income.amount.format_with_symbol(currency));
            println!("  Date:   {}", income.date.format("%Y-%m-%d"));
        }

        IncomeCommands::Show { id } => {
            let income = service.get(parse_id(&id)?)?;
            print!("{}", format_income_details(&income, currency));
        }

        IncomeCommands::Edit {
            id,
            source,
            amount,
            date,
            description,
            clear_description,
        } => {
            let id = parse_id(&id)?;
            let description = if clear_description {
                Some(None)
            } else {
                description.map(Some)
            };
            let changes = IncomeChanges {
                source,
                amount: amount.as_deref().map(parse_amount).transpose()?,
                date: date.as_deref().map(|d| parse_date("date", d)).transpose()?,
                description,
            };

            if changes.is_empty() {
                println!("No changes specified. Use --source, --amount, --date, or --description.");
                return Ok(());
            }

            let updated = service.update(id, changes)?;
            println!("Updated income: {}", updated);
        }

        IncomeCommands::Delete { id } => {
            let deleted = service.delete(parse_id(&id)?)?;
            println!("Deleted income: {}", deleted);
        }
    }

    Ok(())
}
