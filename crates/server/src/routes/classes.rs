//! Class and roster route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;

use hifz_core::{ClassId, Role, UserId};

use crate::db::{ClassRepository, UserRepository};
use crate::error::AppError;
use crate::middleware::{RequireDeveloper, RequireTeacher};
use crate::models::{Class, ClassStudent, CurrentUser};
use crate::state::AppState;

/// Create-class request body.
#[derive(Debug, Deserialize)]
pub struct CreateClassRequest {
    pub name: String,
    pub teacher_id: i32,
}

/// Rename-class request body.
#[derive(Debug, Deserialize)]
pub struct UpdateClassRequest {
    pub name: String,
}

/// Add-student request body.
#[derive(Debug, Deserialize)]
pub struct AddStudentRequest {
    pub student_id: i32,
}

/// Resolve a class and check the requester may manage it: developers may
/// manage any class, a teacher only their own.
pub(crate) async fn ensure_class_access(
    state: &AppState,
    user: &CurrentUser,
    class_id: ClassId,
) -> Result<Class, AppError> {
    let class = ClassRepository::new(state.pool())
        .get_by_id(class_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("class {class_id}")))?;

    match user.role {
        Role::Developer => Ok(class),
        Role::Teacher if class.teacher_id == user.id => Ok(class),
        Role::Teacher => Err(AppError::Forbidden(
            "this class belongs to another teacher".to_string(),
        )),
        Role::Student => Err(AppError::Forbidden(
            "your role does not permit this action".to_string(),
        )),
    }
}

/// List all classes.
pub async fn list(
    RequireDeveloper(_): RequireDeveloper,
    State(state): State<AppState>,
) -> Result<Json<Vec<Class>>, AppError> {
    let classes = ClassRepository::new(state.pool()).list_all().await?;
    Ok(Json(classes))
}

/// Create a class for a teacher.
pub async fn create(
    RequireDeveloper(_): RequireDeveloper,
    State(state): State<AppState>,
    Json(req): Json<CreateClassRequest>,
) -> Result<(StatusCode, Json<Class>), AppError> {
    let teacher_id = UserId::new(req.teacher_id);

    let teacher = UserRepository::new(state.pool())
        .get_by_id(teacher_id)
        .await?
        .ok_or_else(|| AppError::BadRequest(format!("no such teacher: {teacher_id}")))?;
    if teacher.role != Role::Teacher {
        return Err(AppError::BadRequest(format!(
            "user {teacher_id} is not a teacher"
        )));
    }

    let class = ClassRepository::new(state.pool())
        .create(&req.name, teacher_id)
        .await?;

    tracing::info!(class_id = %class.id, teacher_id = %teacher_id, "class created");
    Ok((StatusCode::CREATED, Json(class)))
}

/// Rename a class.
pub async fn update(
    RequireDeveloper(_): RequireDeveloper,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(req): Json<UpdateClassRequest>,
) -> Result<Json<Class>, AppError> {
    let class = ClassRepository::new(state.pool())
        .update(ClassId::new(id), &req.name)
        .await?;
    Ok(Json(class))
}

/// Delete a class.
pub async fn remove(
    RequireDeveloper(_): RequireDeveloper,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    ClassRepository::new(state.pool())
        .delete(ClassId::new(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List the classes taught by one teacher.
///
/// A teacher may only list their own; developers may list anyone's.
pub async fn teacher_classes(
    RequireTeacher(user): RequireTeacher,
    State(state): State<AppState>,
    Path(teacher_id): Path<i32>,
) -> Result<Json<Vec<Class>>, AppError> {
    let teacher_id = UserId::new(teacher_id);

    if user.role == Role::Teacher && user.id != teacher_id {
        return Err(AppError::Forbidden(
            "you can only list your own classes".to_string(),
        ));
    }

    let classes = ClassRepository::new(state.pool())
        .list_by_teacher(teacher_id)
        .await?;
    Ok(Json(classes))
}

/// A class's roster: members with their progress in this class.
pub async fn students(
    RequireTeacher(user): RequireTeacher,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<ClassStudent>>, AppError> {
    let class = ensure_class_access(&state, &user, ClassId::new(id)).await?;

    let roster = ClassRepository::new(state.pool())
        .list_students(class.id)
        .await?;
    Ok(Json(roster))
}

/// Add a student to a class. Adding an existing member is a no-op.
pub async fn add_student(
    RequireTeacher(user): RequireTeacher,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(req): Json<AddStudentRequest>,
) -> Result<StatusCode, AppError> {
    let class = ensure_class_access(&state, &user, ClassId::new(id)).await?;
    let student_id = UserId::new(req.student_id);

    let student = UserRepository::new(state.pool())
        .get_by_id(student_id)
        .await?
        .ok_or_else(|| AppError::BadRequest(format!("no such student: {student_id}")))?;
    if student.role != Role::Student {
        return Err(AppError::BadRequest(format!(
            "user {student_id} is not a student"
        )));
    }

    ClassRepository::new(state.pool())
        .add_student(class.id, student_id)
        .await?;

    tracing::info!(class_id = %class.id, student_id = %student_id, "student added to class");
    Ok(StatusCode::NO_CONTENT)
}

/// Remove a student from a class.
pub async fn remove_student(
    RequireTeacher(user): RequireTeacher,
    State(state): State<AppState>,
    Path((id, student_id)): Path<(i32, i32)>,
) -> Result<StatusCode, AppError> {
    let class = ensure_class_access(&state, &user, ClassId::new(id)).await?;

    ClassRepository::new(state.pool())
        .remove_student(class.id, UserId::new(student_id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
