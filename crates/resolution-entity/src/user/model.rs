//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A registered account.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: i64,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Login email, stored lowercase.
    pub email: String,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Phone number (optional, unique when present).
    pub phone: Option<String>,
    /// Whether the email address has been confirmed with a code.
    pub verified: bool,
    /// Admin flag.
    pub is_admin: bool,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// `"First Last"`.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Whether `actor_id` may read or modify this account.
    pub fn is_accessible_by(&self, actor_id: i64, actor_is_admin: bool) -> bool {
        actor_is_admin || self.id == actor_id
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Email, already normalized.
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Phone number.
    pub phone: Option<String>,
}

/// Partial update of an existing user.
///
/// `None` leaves a column untouched. `phone: Some(None)` clears the phone.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUser {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub phone: Option<Option<String>>,
}

impl UpdateUser {
    /// True when no column would change.
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.password_hash.is_none()
            && self.phone.is_none()
    }
}
