//! Session setup for commands that act on a user's records
//!
//! The user comes from `--user` (or `SELAVU_USER`), the password from
//! `SELAVU_PASSWORD` or an interactive prompt.

use tracing::debug;
use zeroize::Zeroizing;

use crate::error::{TrackerError, TrackerResult};
use crate::services::{AuthService, Session};
use crate::storage::Storage;

/// Environment variable holding the session password
pub const PASSWORD_ENV: &str = "SELAVU_PASSWORD";

/// Environment variable holding a new password for `user add` / `user passwd`
pub const NEW_PASSWORD_ENV: &str = "SELAVU_NEW_PASSWORD";

/// Read a password from `env_var`, falling back to a terminal prompt
pub fn read_password(env_var: &str, prompt: &str) -> TrackerResult<Zeroizing<String>> {
    if let Ok(password) = std::env::var(env_var) {
        debug!(source = env_var, "password taken from environment");
        return Ok(Zeroizing::new(password));
    }
    read_password_prompt(prompt)
}

/// Read a new password, asking twice when prompting
pub fn read_new_password(prompt: &str) -> TrackerResult<Zeroizing<String>> {
    if let Ok(password) = std::env::var(NEW_PASSWORD_ENV) {
        return Ok(Zeroizing::new(password));
    }

    let first = read_password_prompt(prompt)?;
    let second = read_password_prompt("Confirm password: ")?;
    if *first != *second {
        return Err(TrackerError::field("password", "passwords do not match"));
    }
    Ok(first)
}

fn read_password_prompt(prompt: &str) -> TrackerResult<Zeroizing<String>> {
    rpassword::prompt_password(prompt)
        .map(Zeroizing::new)
        .map_err(|e| TrackerError::Auth(format!("Failed to read password: {}", e)))
}

/// Authenticate `username` and return the session for this invocation
pub fn open_session(storage: &Storage, username: Option<&str>) -> TrackerResult<Session> {
    let username = username
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .ok_or_else(|| {
            TrackerError::Auth("no user given; pass --user or set SELAVU_USER".into())
        })?;

    let password = read_password(PASSWORD_ENV, &format!("Password for {}: ", username))?;
    AuthService::new(storage).login(username, &password)
}
