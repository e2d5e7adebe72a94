//! User domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use hifz_core::{Role, UserId, Username};

/// A user (domain type): developer, teacher, or student.
///
/// Never carries the password hash; credential material stays inside the
/// repository and the credential verifier.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Unique login identifier.
    pub username: Username,
    /// Display name, not used for authentication matching.
    pub name: String,
    /// Optional contact phone number.
    pub phone: Option<String>,
    /// The user's role.
    pub role: Role,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}
