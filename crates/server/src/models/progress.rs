//! Progress domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use hifz_core::{ClassId, Position, ProgressEntryId, UserId};

/// A memorization progress entry: one position per (student, class).
#[derive(Debug, Clone, Serialize)]
pub struct ProgressEntry {
    /// Unique entry ID.
    pub id: ProgressEntryId,
    /// The student this entry tracks.
    pub student_id: UserId,
    /// The class this entry belongs to.
    pub class_id: ClassId,
    /// The recorded position.
    #[serde(flatten)]
    pub position: Position,
    /// Who last recorded this entry (teacher or developer); `None` if that
    /// user was since deleted.
    pub updated_by: Option<UserId>,
    /// When the entry was last recorded.
    pub updated_at: DateTime<Utc>,
}
