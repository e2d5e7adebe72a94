//! Progress route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;

use hifz_core::{ClassId, Position, ProgressEntryId, UserId};

use crate::db::{ClassRepository, ProgressRepository};
use crate::error::AppError;
use crate::middleware::RequireTeacher;
use crate::models::ProgressEntry;
use crate::state::AppState;

use super::classes::ensure_class_access;

/// Record-progress request body: which student, and where they reached.
#[derive(Debug, Deserialize)]
pub struct RecordProgressRequest {
    pub student_id: i32,
    pub surah: u16,
    pub ayah: u16,
    pub page: u16,
}

/// Update-progress request body.
#[derive(Debug, Deserialize)]
pub struct UpdateProgressRequest {
    pub surah: u16,
    pub ayah: u16,
    pub page: u16,
}

fn parse_position(surah: u16, ayah: u16, page: u16) -> Result<Position, AppError> {
    Position::new(surah, ayah, page).map_err(|e| AppError::BadRequest(e.to_string()))
}

/// All progress entries for a class.
pub async fn class_progress(
    RequireTeacher(user): RequireTeacher,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<ProgressEntry>>, AppError> {
    let class = ensure_class_access(&state, &user, ClassId::new(id)).await?;

    let entries = ProgressRepository::new(state.pool())
        .list_by_class(class.id)
        .await?;
    Ok(Json(entries))
}

/// Record (or replace) a member student's position in a class.
pub async fn record(
    RequireTeacher(user): RequireTeacher,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(req): Json<RecordProgressRequest>,
) -> Result<(StatusCode, Json<ProgressEntry>), AppError> {
    let class = ensure_class_access(&state, &user, ClassId::new(id)).await?;
    let position = parse_position(req.surah, req.ayah, req.page)?;
    let student_id = UserId::new(req.student_id);

    let is_member = ClassRepository::new(state.pool())
        .is_member(class.id, student_id)
        .await?;
    if !is_member {
        return Err(AppError::BadRequest(format!(
            "student {student_id} is not a member of this class"
        )));
    }

    let entry = ProgressRepository::new(state.pool())
        .upsert(student_id, class.id, position, user.id)
        .await?;

    tracing::info!(
        class_id = %class.id,
        student_id = %student_id,
        position = %position,
        "progress recorded"
    );
    Ok((StatusCode::CREATED, Json(entry)))
}

/// Update an existing progress entry's position.
pub async fn update(
    RequireTeacher(user): RequireTeacher,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(req): Json<UpdateProgressRequest>,
) -> Result<Json<ProgressEntry>, AppError> {
    let id = ProgressEntryId::new(id);
    let position = parse_position(req.surah, req.ayah, req.page)?;

    let progress = ProgressRepository::new(state.pool());
    let entry = progress
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("progress entry {id}")))?;

    // Ownership follows the entry's class
    ensure_class_access(&state, &user, entry.class_id).await?;

    let updated = progress.update(id, position, user.id).await?;
    Ok(Json(updated))
}
