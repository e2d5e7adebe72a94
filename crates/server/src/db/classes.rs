//! Class and membership repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use hifz_core::{ClassId, Position, ProgressEntryId, UserId, Username};

use super::RepositoryError;
use crate::models::{Class, ClassStudent, ProgressSummary};

// =============================================================================
// Internal Row Types
// =============================================================================

const CLASS_COLUMNS: &str = "id, name, teacher_id, created_at";

/// Internal row type for `PostgreSQL` class queries.
#[derive(Debug, sqlx::FromRow)]
struct ClassRow {
    id: i32,
    name: String,
    teacher_id: i32,
    created_at: DateTime<Utc>,
}

impl From<ClassRow> for Class {
    fn from(row: ClassRow) -> Self {
        Self {
            id: ClassId::new(row.id),
            name: row.name,
            teacher_id: UserId::new(row.teacher_id),
            created_at: row.created_at,
        }
    }
}

/// Internal row type for roster queries: a member joined with their
/// progress in this class, if any.
#[derive(Debug, sqlx::FromRow)]
struct RosterRow {
    id: i32,
    username: String,
    name: String,
    progress_id: Option<i32>,
    surah: Option<i16>,
    ayah: Option<i16>,
    page: Option<i16>,
}

impl TryFrom<RosterRow> for ClassStudent {
    type Error = RepositoryError;

    fn try_from(row: RosterRow) -> Result<Self, Self::Error> {
        let username = Username::parse(&row.username).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid username in database: {e}"))
        })?;

        let progress = match (row.progress_id, row.surah, row.ayah, row.page) {
            (Some(id), Some(surah), Some(ayah), Some(page)) => Some(ProgressSummary {
                id: ProgressEntryId::new(id),
                position: position_from_columns(surah, ayah, page)?,
            }),
            _ => None,
        };

        Ok(Self {
            id: UserId::new(row.id),
            username,
            name: row.name,
            progress,
        })
    }
}

/// Rebuild a validated [`Position`] from stored smallint columns.
pub(super) fn position_from_columns(
    surah: i16,
    ayah: i16,
    page: i16,
) -> Result<Position, RepositoryError> {
    let (surah, ayah, page) = (
        u16::try_from(surah),
        u16::try_from(ayah),
        u16::try_from(page),
    );
    let (Ok(surah), Ok(ayah), Ok(page)) = (surah, ayah, page) else {
        return Err(RepositoryError::DataCorruption(
            "negative quran position in database".to_string(),
        ));
    };

    Position::new(surah, ayah, page)
        .map_err(|e| RepositoryError::DataCorruption(format!("invalid quran position: {e}")))
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for class and membership database operations.
pub struct ClassRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ClassRepository<'a> {
    /// Create a new class repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all classes.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Class>, RepositoryError> {
        let rows: Vec<ClassRow> = sqlx::query_as(&format!(
            "SELECT {CLASS_COLUMNS} FROM classes ORDER BY name, id"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// List the classes taught by one teacher.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_by_teacher(&self, teacher_id: UserId) -> Result<Vec<Class>, RepositoryError> {
        let rows: Vec<ClassRow> = sqlx::query_as(&format!(
            "SELECT {CLASS_COLUMNS} FROM classes WHERE teacher_id = $1 ORDER BY name, id"
        ))
        .bind(teacher_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Get a class by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: ClassId) -> Result<Option<Class>, RepositoryError> {
        let row: Option<ClassRow> =
            sqlx::query_as(&format!("SELECT {CLASS_COLUMNS} FROM classes WHERE id = $1"))
                .bind(id)
                .fetch_optional(self.pool)
                .await?;

        Ok(row.map(Into::into))
    }

    /// Create a new class.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails (including a
    /// nonexistent teacher, which callers should pre-validate).
    pub async fn create(&self, name: &str, teacher_id: UserId) -> Result<Class, RepositoryError> {
        let row: ClassRow = sqlx::query_as(&format!(
            "INSERT INTO classes (name, teacher_id) VALUES ($1, $2) RETURNING {CLASS_COLUMNS}"
        ))
        .bind(name)
        .bind(teacher_id)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// Rename a class.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the class doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(&self, id: ClassId, name: &str) -> Result<Class, RepositoryError> {
        let row: Option<ClassRow> = sqlx::query_as(&format!(
            "UPDATE classes SET name = $1 WHERE id = $2 RETURNING {CLASS_COLUMNS}"
        ))
        .bind(name)
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(Into::into).ok_or(RepositoryError::NotFound)
    }

    /// Delete a class. Cascades to memberships and progress entries.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the class doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: ClassId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM classes WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// List a class's students with their progress in this class.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a row is invalid.
    pub async fn list_students(
        &self,
        class_id: ClassId,
    ) -> Result<Vec<ClassStudent>, RepositoryError> {
        let rows: Vec<RosterRow> = sqlx::query_as(
            "SELECT u.id, u.username, u.name,
                    p.id AS progress_id, p.surah, p.ayah, p.page
             FROM users u
             JOIN class_members cm ON u.id = cm.student_id
             LEFT JOIN progress p ON u.id = p.student_id AND cm.class_id = p.class_id
             WHERE cm.class_id = $1
             ORDER BY u.name, u.id",
        )
        .bind(class_id)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Add a student to a class. Adding an existing member is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn add_student(
        &self,
        class_id: ClassId,
        student_id: UserId,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO class_members (class_id, student_id)
             VALUES ($1, $2)
             ON CONFLICT DO NOTHING",
        )
        .bind(class_id)
        .bind(student_id)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Remove a student from a class.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the student was not a member.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn remove_student(
        &self,
        class_id: ClassId,
        student_id: UserId,
    ) -> Result<(), RepositoryError> {
        let result =
            sqlx::query("DELETE FROM class_members WHERE class_id = $1 AND student_id = $2")
                .bind(class_id)
                .bind(student_id)
                .execute(self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Whether a student is a member of a class.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn is_member(
        &self,
        class_id: ClassId,
        student_id: UserId,
    ) -> Result<bool, RepositoryError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM class_members WHERE class_id = $1 AND student_id = $2)",
        )
        .bind(class_id)
        .bind(student_id)
        .fetch_one(self.pool)
        .await?;

        Ok(exists)
    }
}
