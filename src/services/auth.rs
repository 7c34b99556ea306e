//! Users, passwords and sessions
//!
//! A `Session` is the authenticated user for one command invocation. Every
//! record-level service takes one and only ever sees that user's rows.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use serde_json::json;
use tracing::{info, warn};

use crate::audit::EntityType;
use crate::error::{FieldError, TrackerError, TrackerResult};
use crate::models::{User, UserId};
use crate::storage::Storage;

/// Shortest accepted password
pub const MIN_PASSWORD_LEN: usize = 8;

/// Hash a password into an Argon2 PHC string
pub fn hash_password(password: &str) -> TrackerResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| TrackerError::Auth(format!("Failed to hash password: {}", e)))
}

/// Check a password against a stored PHC string
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    match PasswordHash::new(password_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

fn check_password_strength(password: &str) -> Result<(), Vec<FieldError>> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(vec![FieldError::new(
            "password",
            format!("must be at least {} characters", MIN_PASSWORD_LEN),
        )]);
    }
    Ok(())
}

/// What the audit log keeps about a user; never the hash
fn audit_view(user: &User) -> serde_json::Value {
    json!({
        "id": user.id,
        "username": user.username,
        "is_admin": user.is_admin,
    })
}

/// The authenticated user for the current invocation
#[derive(Debug, Clone)]
pub struct Session {
    user: User,
}

impl Session {
    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn user_id(&self) -> UserId {
        self.user.id
    }

    pub fn username(&self) -> &str {
        &self.user.username
    }

    pub fn is_admin(&self) -> bool {
        self.user.is_admin
    }

    /// Name recorded in the audit log
    pub fn actor(&self) -> Option<&str> {
        Some(&self.user.username)
    }

    /// Fail unless the session user is an admin
    pub fn require_admin(&self) -> TrackerResult<()> {
        if self.user.is_admin {
            Ok(())
        } else {
            Err(TrackerError::Forbidden(format!(
                "'{}' is not an administrator",
                self.user.username
            )))
        }
    }

    #[cfg(test)]
    pub(crate) fn for_user(user: User) -> Self {
        Self { user }
    }
}

/// Service for user accounts and authentication
pub struct AuthService<'a> {
    storage: &'a Storage,
}

impl<'a> AuthService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub fn find_user(&self, username: &str) -> TrackerResult<Option<User>> {
        let username = username.trim();
        self.storage.users.find(|u| u.username == username)
    }

    /// All users ordered by id
    pub fn list_users(&self) -> TrackerResult<Vec<User>> {
        self.storage.users.list()
    }

    /// Authenticate and open a session
    ///
    /// Unknown users and wrong passwords give the same error.
    pub fn login(&self, username: &str, password: &str) -> TrackerResult<Session> {
        let user = self.find_user(username)?;
        match user {
            Some(user) if verify_password(password, &user.password_hash) => {
                info!(user = %user.username, "session opened");
                Ok(Session { user })
            }
            _ => {
                warn!(user = %username.trim(), "failed login");
                Err(TrackerError::Auth("invalid username or password".into()))
            }
        }
    }

    fn insert_user(
        &self,
        username: &str,
        password: &str,
        is_admin: bool,
        actor: Option<&str>,
    ) -> TrackerResult<User> {
        let mut user = User::new(username, String::new());
        user.is_admin = is_admin;

        let mut errors = user.validate().err().unwrap_or_default();
        if let Err(password_errors) = check_password_strength(password) {
            errors.extend(password_errors);
        }
        if !errors.is_empty() {
            return Err(TrackerError::Form(errors));
        }

        if self.find_user(&user.username)?.is_some() {
            return Err(TrackerError::Duplicate {
                entity_type: "User",
                identifier: user.username,
            });
        }

        user.password_hash = hash_password(password)?;
        let user = self.storage.users.insert(user)?;
        self.storage.users.save()?;

        self.storage.log_create(
            actor,
            EntityType::User,
            user.id.to_string(),
            Some(user.username.clone()),
            &audit_view(&user),
        )?;
        info!(user = %user.username, admin = user.is_admin, "user created");

        Ok(user)
    }

    /// Create a user on behalf of an admin
    pub fn create_user(
        &self,
        session: &Session,
        username: &str,
        password: &str,
        is_admin: bool,
    ) -> TrackerResult<User> {
        session.require_admin()?;
        self.insert_user(username, password, is_admin, session.actor())
    }

    /// Make sure an admin account with this name exists
    ///
    /// Creates it with `password` if missing, or promotes an existing user
    /// whose password matches. Returns the user and whether it was created.
    pub fn ensure_admin(&self, username: &str, password: &str) -> TrackerResult<(User, bool)> {
        let Some(existing) = self.find_user(username)? else {
            let user = self.insert_user(username, password, true, None)?;
            return Ok((user, true));
        };

        if !verify_password(password, &existing.password_hash) {
            return Err(TrackerError::Auth("invalid username or password".into()));
        }
        if existing.is_admin {
            return Ok((existing, false));
        }

        let before = existing.clone();
        let mut user = existing;
        user.is_admin = true;
        self.storage.users.update(user.clone())?;
        self.storage.users.save()?;
        self.storage.log_update(
            None,
            EntityType::User,
            user.id.to_string(),
            Some(user.username.clone()),
            &audit_view(&before),
            &audit_view(&user),
        )?;
        info!(user = %user.username, "user promoted to admin");

        Ok((user, false))
    }

    /// Replace the session user's password
    pub fn change_password(&self, session: &Session, new_password: &str) -> TrackerResult<()> {
        check_password_strength(new_password)?;

        let mut user = self
            .storage
            .users
            .get(session.user_id())?
            .ok_or_else(|| TrackerError::user_not_found(session.username()))?;
        user.password_hash = hash_password(new_password)?;
        self.storage.users.update(user.clone())?;
        self.storage.users.save()?;

        let view = audit_view(&user);
        self.storage.log_update(
            session.actor(),
            EntityType::User,
            user.id.to_string(),
            Some(user.username.clone()),
            &view,
            &view,
        )?;
        info!(user = %user.username, "password changed");
        Ok(())
    }
}
