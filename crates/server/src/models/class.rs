//! Class domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use hifz_core::{ClassId, Position, ProgressEntryId, UserId, Username};

/// A class taught by one teacher.
#[derive(Debug, Clone, Serialize)]
pub struct Class {
    /// Unique class ID.
    pub id: ClassId,
    /// Class name.
    pub name: String,
    /// The teacher who owns this class.
    pub teacher_id: UserId,
    /// When the class was created.
    pub created_at: DateTime<Utc>,
}

/// A student's memorization position within one class, as shown on the
/// roster.
#[derive(Debug, Clone, Serialize)]
pub struct ProgressSummary {
    /// The progress entry's ID (used to address updates).
    pub id: ProgressEntryId,
    /// The recorded position.
    #[serde(flatten)]
    pub position: Position,
}

/// A roster row: a class member and their progress in this class, if any
/// has been recorded yet.
#[derive(Debug, Clone, Serialize)]
pub struct ClassStudent {
    /// The student's user ID.
    pub id: UserId,
    /// The student's login identifier.
    pub username: Username,
    /// The student's display name.
    pub name: String,
    /// Progress in this class; `None` until the teacher records some.
    pub progress: Option<ProgressSummary>,
}
