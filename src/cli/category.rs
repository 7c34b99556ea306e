//! Category CLI commands

use clap::Subcommand;

use crate::display::category::{format_category_details, format_category_list};
use crate::error::TrackerResult;
use crate::services::{CategoryService, Session};
use crate::storage::Storage;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List your categories
    List,

    /// Create a new category
    #[command(alias = "create")]
    Add {
        /// Category name
        name: String,
    },

    /// Show category details
    Show {
        /// Category name or ID
        category: String,
    },

    /// Rename a category
    Rename {
        /// Category name or ID
        category: String,
        /// New name
        name: String,
    },

    /// Delete a category and every expense filed under it
    Delete {
        /// Category name or ID
        category: String,
        /// Delete even when the category still has expenses
        #[arg(long)]
        force: bool,
    },
}

/// Handle a category command
pub fn handle_category_command(
    storage: &Storage,
    session: &Session,
    cmd: CategoryCommands,
) -> TrackerResult<()> {
    let service = CategoryService::new(storage, session);

    match cmd {
        CategoryCommands::List => {
            let rows = service
                .list()?
                .into_iter()
                .map(|c| -> TrackerResult<_> {
                    let count = service.expense_count(c.id)?;
                    Ok((c, count))
                })
                .collect::<TrackerResult<Vec<_>>>()?;
            print!("{}", format_category_list(&rows));
        }

        CategoryCommands::Add { name } => {
            let category = service.create(&name)?;
            println!("Created category: {}", category.name);
            println!("  ID: {}", category.id);
        }

        CategoryCommands::Show { category } => {
            let cat = service.find(&category)?;
            let count = service.expense_count(cat.id)?;
            print!("{}", format_category_details(&cat, count));
        }

        CategoryCommands::Rename { category, name } => {
            let cat = service.find(&category)?;
            let old_name = cat.name.clone();
            let renamed = service.rename(cat.id, &name)?;
            println!("Renamed category '{}' to '{}'", old_name, renamed.name);
        }

        CategoryCommands::Delete { category, force } => {
            let cat = service.find(&category)?;
            let count = service.expense_count(cat.id)?;

            if count > 0 && !force {
                println!(
                    "Category '{}' has {} expense(s) that would be deleted with it.",
                    cat.name, count
                );
                println!("To proceed, run again with --force:");
                println!("  selavu category delete \"{}\" --force", cat.name);
                return Ok(());
            }

            let (deleted, expenses) = service.delete(cat.id)?;
            println!("Deleted category: {}", deleted.name);
            if !expenses.is_empty() {
                println!("  Also deleted {} expense(s)", expenses.len());
            }
        }
    }

    Ok(())
}
