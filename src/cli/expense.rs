//! Expense CLI commands

use std::collections::HashMap;

use clap::Subcommand;

use super::{parse_amount, parse_date};
use crate::config::settings::Settings;
use crate::display::expense::{format_expense_details, format_expense_list};
use crate::error::{TrackerError, TrackerResult};
use crate::models::ExpenseId;
use crate::services::{
    CategoryService, ExpenseChanges, ExpenseFilter, ExpenseService, NewExpense, PeriodService,
    Session,
};
use crate::storage::Storage;

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// List expenses (defaults to the current billing period)
    List {
        /// Period: "current", "last", "2025-02" or "2025-01-01..2025-01-31"
        #[arg(short, long)]
        period: Option<String>,
        /// Only expenses in this category (name or ID)
        #[arg(short, long)]
        category: Option<String>,
        /// Ignore the period and list everything
        #[arg(long, conflicts_with = "period")]
        all: bool,
    },

    /// Record an expense
    Add {
        /// Category name or ID
        category: String,
        /// Amount (e.g. "12.50")
        amount: String,
        /// What the money was spent on
        description: String,
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Show expense details
    Show {
        /// Expense ID
        id: String,
    },

    /// Edit an expense
    Edit {
        /// Expense ID
        id: String,
        /// New category name or ID
        #[arg(short, long)]
        category: Option<String>,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
        /// New date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
        /// New description
        #[arg(long)]
        description: Option<String>,
    },

    /// Delete an expense
    Delete {
        /// Expense ID
        id: String,
    },
}

fn parse_id(id: &str) -> TrackerResult<ExpenseId> {
    id.parse()
        .map_err(|_| TrackerError::expense_not_found(id.trim()))
}

/// Handle an expense command
pub fn handle_expense_command(
    storage: &Storage,
    settings: &Settings,
    session: &Session,
    cmd: ExpenseCommands,
) -> TrackerResult<()> {
    let service = ExpenseService::new(storage, session);
    let categories = CategoryService::new(storage, session);
    let currency = settings.currency_symbol.as_str();

    match cmd {
        ExpenseCommands::List {
            period,
            category,
            all,
        } => {
            let period = if all {
                None
            } else {
                Some(PeriodService::new(settings).parse_or_current(period.as_deref())?)
            };
            let category_id = match category {
                Some(c) => Some(categories.find(&c)?.id),
                None => None,
            };

            let expenses = service.list(&ExpenseFilter {
                period,
                category_id,
            })?;
            let names: HashMap<_, _> = categories
                .list()?
                .into_iter()
                .map(|c| (c.id, c.name))
                .collect();

            if let Some(period) = period {
                println!("Period: {}", period);
                println!();
            }
            print!("{}", format_expense_list(&expenses, &names, currency));
        }

        ExpenseCommands::Add {
            category,
            amount,
            description,
            date,
        } => {
            let category = categories.find(&category)?;
            let date = date.as_deref().map(|d| parse_date("date", d)).transpose()?;

            let expense = service.create(NewExpense {
                category_id: category.id,
                date,
                amount: parse_amount(&amount)?,
                description,
            })?;

            println!("Recorded expense: {}", expense.description);
            println!("  ID:       {}", expense.id);
            println!("  Category: {}", category.name);
            println!("  Amount:   {}", expense.amount.format_with_symbol(currency));
            println!("  Date:     {}", expense.date.format("%Y-%m-%d"));
        }

        ExpenseCommands::Show { id } => {
            let expense = service.get(parse_id(&id)?)?;
            let category = categories.get(expense.category_id)?;
            print!(
                "{}",
                format_expense_details(&expense, &category.name, currency)
            );
        }

        ExpenseCommands::Edit {
            id,
            category,
            amount,
            date,
            description,
        } => {
            let id = parse_id(&id)?;
            let changes = ExpenseChanges {
                category_id: match category {
                    Some(c) => Some(categories.find(&c)?.id),
                    None => None,
                },
                date: date.as_deref().map(|d| parse_date("date", d)).transpose()?,
                amount: amount.as_deref().map(parse_amount).transpose()?,
                description,
            };

            if changes.is_empty() {
                println!(
                    "No changes specified. Use --category, --amount, --date, or --description."
                );
                return Ok(());
            }

            let updated = service.update(id, changes)?;
            println!("Updated expense: {}", updated);
        }

        ExpenseCommands::Delete { id } => {
            let deleted = service.delete(parse_id(&id)?)?;
            println!("Deleted expense: {}", deleted);
        }
    }

    Ok(())
}
