//! The closed set of user roles.

use serde::{Deserialize, Serialize};

/// A user's role.
///
/// Exactly one role per user at any time. Branching on role is always done
/// with an exhaustive `match` so a future variant cannot silently fall
/// through to an unintended default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "user_role", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Super-admin: manages teachers, students, and classes.
    Developer,
    /// Manages their own classes and records student progress.
    Teacher,
    /// Views their own memorization progress.
    Student,
}

impl Role {
    /// All roles, in privilege order.
    pub const ALL: [Self; 3] = [Self::Developer, Self::Teacher, Self::Student];
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Developer => write!(f, "developer"),
            Self::Teacher => write!(f, "teacher"),
            Self::Student => write!(f, "student"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "developer" => Ok(Self::Developer),
            "teacher" => Ok(Self::Teacher),
            "student" => Ok(Self::Student),
            _ => Err(format!("invalid role: {s}")),
        }
    }
}
