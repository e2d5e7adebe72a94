//! Student dashboard route handlers.

use axum::{Json, extract::State};
use serde::Serialize;

use hifz_core::Username;

use crate::db::ProgressRepository;
use crate::error::AppError;
use crate::middleware::RequireStudent;
use crate::models::ProgressEntry;
use crate::state::AppState;

/// The student's own dashboard data.
#[derive(Debug, Serialize)]
pub struct StudentDashboard {
    pub username: Username,
    pub name: String,
    pub progress: Vec<ProgressEntry>,
}

/// The requesting student's own progress across their classes.
pub async fn me(
    RequireStudent(user): RequireStudent,
    State(state): State<AppState>,
) -> Result<Json<StudentDashboard>, AppError> {
    let progress = ProgressRepository::new(state.pool())
        .list_by_student(user.id)
        .await?;

    Ok(Json(StudentDashboard {
        username: user.username,
        name: user.name,
        progress,
    }))
}
