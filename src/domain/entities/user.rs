//! User entity and repository trait.
//!
//! Maps to the `users` table in the database schema.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{Page, PageRequest};
use crate::shared::error::AppError;

/// Maximum length for username, first and last name.
pub const MAX_NAME_LENGTH: u64 = 150;

/// Maximum length for an email address.
pub const MAX_EMAIL_LENGTH: u64 = 254;

/// Represents a registered user.
///
/// Maps to the `users` table:
/// - id: BIGINT PRIMARY KEY (Snowflake ID)
/// - email: VARCHAR(254) NOT NULL UNIQUE
/// - username: VARCHAR(150) NOT NULL UNIQUE
/// - first_name: VARCHAR(150) NOT NULL
/// - last_name: VARCHAR(150) NOT NULL
/// - password_hash: VARCHAR(255) NOT NULL
/// - is_admin: BOOLEAN NOT NULL DEFAULT FALSE
/// - created_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Snowflake ID (primary key)
    pub id: i64,

    /// Email address (unique, used as the login)
    pub email: String,

    /// Username (unique)
    pub username: String,

    pub first_name: String,

    pub last_name: String,

    /// Argon2 password hash
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Administrators may edit and delete any recipe
    pub is_admin: bool,

    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Default for User {
    fn default() -> Self {
        Self {
            id: 0,
            email: String::new(),
            username: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            password_hash: String::new(),
            is_admin: false,
            created_at: Utc::now(),
        }
    }
}

/// Check a username against `^[a-zA-Z0-9]+([_.-]?[a-zA-Z0-9])*$`.
///
/// Letters and digits, optionally separated by single `_`, `.` or `-`;
/// separators may not lead, trail or repeat.
pub fn is_valid_username(username: &str) -> bool {
    let mut previous_was_separator = true;
    for c in username.chars() {
        if c.is_ascii_alphanumeric() {
            previous_was_separator = false;
        } else if matches!(c, '_' | '.' | '-') {
            if previous_was_separator {
                return false;
            }
            previous_was_separator = true;
        } else {
            return false;
        }
    }
    !username.is_empty() && !previous_was_separator
}

/// Repository trait for User data access operations.
///
/// Implementations of this trait handle the actual database interactions.
/// The trait is defined in the domain layer to maintain dependency inversion.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by their Snowflake ID.
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError>;

    /// Fetch several users at once; missing IDs are skipped.
    async fn find_many(&self, ids: &[i64]) -> Result<Vec<User>, AppError>;

    /// Check whether a user exists.
    async fn exists(&self, id: i64) -> Result<bool, AppError>;

    /// List all users ordered by username.
    async fn list(&self, page: PageRequest) -> Result<Page<User>, AppError>;

    /// List the authors `follower_id` is subscribed to, ordered by username.
    async fn list_followed_by(&self, follower_id: i64, page: PageRequest)
        -> Result<Page<User>, AppError>;

    /// Create a new user.
    ///
    /// Fails with `AlreadyExists` when the email or username is taken.
    async fn create(&self, user: &User) -> Result<User, AppError>;

    /// Check if an email address is already registered.
    async fn email_exists(&self, email: &str) -> Result<bool, AppError>;

    /// Check if a username is already taken.
    async fn username_exists(&self, username: &str) -> Result<bool, AppError>;
}
