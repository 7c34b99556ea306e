//! User and admin CLI commands

use clap::Subcommand;

use super::session::{read_new_password, read_password, PASSWORD_ENV};
use crate::display::user::format_user_list;
use crate::error::TrackerResult;
use crate::services::{AuthService, Session};
use crate::storage::Storage;

/// User subcommands
#[derive(Subcommand)]
pub enum UserCommands {
    /// Create a user (admin only)
    Add {
        /// Username
        username: String,
        /// Give the new user admin rights
        #[arg(long)]
        admin: bool,
    },

    /// List users (admin only)
    List,

    /// Change your own password
    Passwd,
}

/// Admin bootstrap subcommands
#[derive(Subcommand)]
pub enum AdminCommands {
    /// Create an admin account, or promote an existing user whose password matches
    Ensure {
        /// Username for the admin account
        username: String,
    },
}

/// Handle a user command
pub fn handle_user_command(
    storage: &Storage,
    session: &Session,
    cmd: UserCommands,
) -> TrackerResult<()> {
    let service = AuthService::new(storage);

    match cmd {
        UserCommands::Add { username, admin } => {
            session.require_admin()?;
            let password = read_new_password(&format!("Password for {}: ", username))?;
            let user = service.create_user(session, &username, &password, admin)?;
            println!("Created user: {}", user.username);
            println!("  ID: {}", user.id);
            if user.is_admin {
                println!("  Admin: yes");
            }
        }

        UserCommands::List => {
            session.require_admin()?;
            print!("{}", format_user_list(&service.list_users()?));
        }

        UserCommands::Passwd => {
            let password = read_new_password("New password: ")?;
            service.change_password(session, &password)?;
            println!("Password changed for {}", session.username());
        }
    }

    Ok(())
}

/// Handle an admin command
///
/// Runs without a session so the first admin can be created.
pub fn handle_admin_command(storage: &Storage, cmd: AdminCommands) -> TrackerResult<()> {
    let service = AuthService::new(storage);

    match cmd {
        AdminCommands::Ensure { username } => {
            let password = read_password(PASSWORD_ENV, &format!("Password for {}: ", username))?;
            let (user, created) = service.ensure_admin(&username, &password)?;
            if created {
                println!("Created admin user: {}", user.username);
            } else {
                println!("Admin user ready: {}", user.username);
            }
        }
    }

    Ok(())
}
