//! Progress repository.
//!
//! One entry per (student, class), upserted on that key.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use hifz_core::{ClassId, Position, ProgressEntryId, UserId};

use super::RepositoryError;
use super::classes::position_from_columns;
use crate::models::ProgressEntry;

// =============================================================================
// Internal Row Types
// =============================================================================

const PROGRESS_COLUMNS: &str =
    "id, student_id, class_id, surah, ayah, page, updated_by, updated_at";

/// Internal row type for `PostgreSQL` progress queries.
#[derive(Debug, sqlx::FromRow)]
struct ProgressRow {
    id: i32,
    student_id: i32,
    class_id: i32,
    surah: i16,
    ayah: i16,
    page: i16,
    updated_by: Option<i32>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ProgressRow> for ProgressEntry {
    type Error = RepositoryError;

    fn try_from(row: ProgressRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ProgressEntryId::new(row.id),
            student_id: UserId::new(row.student_id),
            class_id: ClassId::new(row.class_id),
            position: position_from_columns(row.surah, row.ayah, row.page)?,
            updated_by: row.updated_by.map(UserId::new),
            updated_at: row.updated_at,
        })
    }
}

/// Bindable smallint triple for a validated position.
const fn position_columns(position: Position) -> (i16, i16, i16) {
    // Validated ranges (<= 604) always fit in i16
    (
        position.surah.number() as i16,
        position.ayah as i16,
        position.page.number() as i16,
    )
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for progress database operations.
pub struct ProgressRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProgressRepository<'a> {
    /// Create a new progress repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a progress entry by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the row is invalid.
    pub async fn get_by_id(
        &self,
        id: ProgressEntryId,
    ) -> Result<Option<ProgressEntry>, RepositoryError> {
        let row: Option<ProgressRow> = sqlx::query_as(&format!(
            "SELECT {PROGRESS_COLUMNS} FROM progress WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// List all progress entries for a class.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a row is invalid.
    pub async fn list_by_class(
        &self,
        class_id: ClassId,
    ) -> Result<Vec<ProgressEntry>, RepositoryError> {
        let rows: Vec<ProgressRow> = sqlx::query_as(&format!(
            "SELECT {PROGRESS_COLUMNS} FROM progress WHERE class_id = $1 ORDER BY id"
        ))
        .bind(class_id)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// List a student's progress entries across all their classes.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a row is invalid.
    pub async fn list_by_student(
        &self,
        student_id: UserId,
    ) -> Result<Vec<ProgressEntry>, RepositoryError> {
        let rows: Vec<ProgressRow> = sqlx::query_as(&format!(
            "SELECT {PROGRESS_COLUMNS} FROM progress WHERE student_id = $1 ORDER BY id"
        ))
        .bind(student_id)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Update an existing entry's position, stamping who recorded it.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the entry doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: ProgressEntryId,
        position: Position,
        updated_by: UserId,
    ) -> Result<ProgressEntry, RepositoryError> {
        let (surah, ayah, page) = position_columns(position);

        let row: Option<ProgressRow> = sqlx::query_as(&format!(
            "UPDATE progress
             SET surah = $1, ayah = $2, page = $3, updated_by = $4, updated_at = now()
             WHERE id = $5
             RETURNING {PROGRESS_COLUMNS}"
        ))
        .bind(surah)
        .bind(ayah)
        .bind(page)
        .bind(updated_by)
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.ok_or(RepositoryError::NotFound)?.try_into()
    }

    /// Record a student's position in a class, inserting or replacing the
    /// (student, class) entry.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the upsert fails.
    pub async fn upsert(
        &self,
        student_id: UserId,
        class_id: ClassId,
        position: Position,
        updated_by: UserId,
    ) -> Result<ProgressEntry, RepositoryError> {
        let (surah, ayah, page) = position_columns(position);

        let row: ProgressRow = sqlx::query_as(&format!(
            "INSERT INTO progress (student_id, class_id, surah, ayah, page, updated_by)
             VALUES ($1, $2, $3, $4, $5, $6)
             ON CONFLICT (student_id, class_id) DO UPDATE
             SET surah = EXCLUDED.surah, ayah = EXCLUDED.ayah, page = EXCLUDED.page,
                 updated_by = EXCLUDED.updated_by, updated_at = now()
             RETURNING {PROGRESS_COLUMNS}"
        ))
        .bind(student_id)
        .bind(class_id)
        .bind(surah)
        .bind(ayah)
        .bind(page)
        .bind(updated_by)
        .fetch_one(self.pool)
        .await?;

        row.try_into()
    }
}
