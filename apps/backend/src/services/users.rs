//! Registered users.
//!
//! Accounts live in a process-local concurrent map keyed by normalized
//! email. Passwords are stored only as Argon2 PHC strings.

use std::fmt;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use unicode_normalization::UnicodeNormalization;
use uuid::Uuid;

use crate::auth::password::{hash_password, verify_password};
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::logging::pii::Redacted;

/// Sign-up payload.
#[derive(Clone, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub bio: Option<String>,
    pub password: String,
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("name", &self.name)
            .field("email", &Redacted(&self.email))
            .field("bio", &self.bio)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Public view of an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserProfile {
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub bio: Option<String>,
}

#[derive(Debug)]
struct StoredUser {
    profile: UserProfile,
    password_hash: String,
}

#[derive(Debug, Default)]
pub struct UserDirectory {
    users: DashMap<String, StoredUser>,
}

impl UserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new account.
    ///
    /// Fails with `USER_EXISTS` if the normalized email is already taken.
    pub fn sign_up(&self, new_user: NewUser) -> Result<UserProfile, AppError> {
        let email = normalize_email(&new_user.email);
        validate_email(&email)?;

        let name = new_user.name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::bad_request(
                ErrorCode::ValidationError,
                "Name cannot be empty",
            ));
        }
        if new_user.password.is_empty() {
            return Err(AppError::bad_request(
                ErrorCode::ValidationError,
                "Password cannot be empty",
            ));
        }

        // Cheap pre-check so duplicates don't pay for hashing.
        if self.users.contains_key(&email) {
            return Err(user_exists());
        }

        let password_hash = hash_password(&new_user.password)?;

        let profile = UserProfile {
            user_id: Uuid::new_v4(),
            name,
            email: email.clone(),
            bio: new_user.bio.filter(|b| !b.trim().is_empty()),
        };

        match self.users.entry(email) {
            Entry::Occupied(_) => Err(user_exists()),
            Entry::Vacant(slot) => {
                info!(user_id = %profile.user_id, email = %Redacted(&profile.email), "User created");
                slot.insert(StoredUser {
                    profile: profile.clone(),
                    password_hash,
                });
                Ok(profile)
            }
        }
    }

    /// Check an email/password pair and return the matching account.
    pub fn authenticate(&self, email: &str, password: &str) -> Result<UserProfile, AppError> {
        let email = normalize_email(email);

        let (profile, password_hash) = match self.users.get(&email) {
            Some(user) => (user.profile.clone(), user.password_hash.clone()),
            None => {
                debug!(email = %Redacted(&email), "Login for unknown email");
                return Err(AppError::not_found(
                    ErrorCode::UserNotFound,
                    "User not found! Please sign up first.",
                ));
            }
        };

        if !verify_password(&password_hash, password)? {
            debug!(user_id = %profile.user_id, "Login with wrong password");
            return Err(AppError::unauthorized(
                ErrorCode::InvalidPassword,
                "Invalid password",
            ));
        }

        Ok(profile)
    }

    pub fn find_by_email(&self, email: &str) -> Option<UserProfile> {
        self.users
            .get(&normalize_email(email))
            .map(|user| user.profile.clone())
    }

    /// All accounts, ordered by email.
    pub fn list(&self) -> Vec<UserProfile> {
        let mut profiles: Vec<UserProfile> = self
            .users
            .iter()
            .map(|entry| entry.value().profile.clone())
            .collect();
        profiles.sort_by(|a, b| a.email.cmp(&b.email));
        profiles
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

/// Trim, NFKC-normalize, and lowercase an email so visually identical
/// addresses map to one account.
pub fn normalize_email(email: &str) -> String {
    email.trim().nfkc().collect::<String>().to_lowercase()
}

fn validate_email(email: &str) -> Result<(), AppError> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && !domain.is_empty() && !domain.contains('@')
        }
        None => false,
    };

    if valid {
        Ok(())
    } else {
        Err(AppError::bad_request(
            ErrorCode::InvalidEmail,
            "Email address is invalid",
        ))
    }
}

fn user_exists() -> AppError {
    AppError::bad_request(
        ErrorCode::UserExists,
        "User with this email already exists",
    )
}
