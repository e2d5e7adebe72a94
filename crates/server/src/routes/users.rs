//! User management route handlers (developer only).

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use hifz_core::{Role, UserId, Username};

use crate::auth::password;
use crate::db::UserRepository;
use crate::error::AppError;
use crate::middleware::RequireDeveloper;
use crate::models::User;
use crate::state::AppState;

/// Query parameters for the user listing.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub role: Option<Role>,
}

/// Create-user request body. The plaintext password is hashed before it
/// reaches the repository and is never stored or logged.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub name: String,
    pub phone: Option<String>,
    pub role: Role,
    pub password: String,
}

/// Update-user request body. A `password` field, when present, re-hashes
/// and replaces the stored credential.
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub name: String,
    pub phone: Option<String>,
    pub role: Role,
    pub password: Option<String>,
}

/// List users, optionally filtered by role.
pub async fn list(
    RequireDeveloper(_): RequireDeveloper,
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<User>>, AppError> {
    let users = UserRepository::new(state.pool()).list(query.role).await?;
    Ok(Json(users))
}

/// Create a user.
pub async fn create(
    RequireDeveloper(_): RequireDeveloper,
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let username = Username::parse(&req.username).map_err(|e| AppError::BadRequest(e.to_string()))?;
    password::validate_password(&req.password).map_err(AppError::BadRequest)?;

    let password_hash =
        password::hash_password(&req.password).map_err(|e| AppError::Internal(e.to_string()))?;

    let user = UserRepository::new(state.pool())
        .create(
            &username,
            &req.name,
            req.phone.as_deref(),
            req.role,
            &password_hash,
        )
        .await?;

    tracing::info!(user_id = %user.id, role = %user.role, "user created");
    Ok((StatusCode::CREATED, Json(user)))
}

/// Update a user's name, phone, role, and optionally their password.
pub async fn update(
    RequireDeveloper(_): RequireDeveloper,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<User>, AppError> {
    let id = UserId::new(id);
    let users = UserRepository::new(state.pool());

    if let Some(new_password) = req.password.as_deref() {
        password::validate_password(new_password).map_err(AppError::BadRequest)?;
        let password_hash =
            password::hash_password(new_password).map_err(|e| AppError::Internal(e.to_string()))?;
        users.update_password_hash(id, &password_hash).await?;
    }

    let user = users
        .update(id, &req.name, req.phone.as_deref(), req.role)
        .await?;

    Ok(Json(user))
}

/// Delete a user.
///
/// Refuses to delete the last developer: the system would become
/// unmanageable.
pub async fn remove(
    RequireDeveloper(_): RequireDeveloper,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    let id = UserId::new(id);
    let users = UserRepository::new(state.pool());

    let target = users
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("user {id}")))?;

    if target.role == Role::Developer && users.count_by_role(Role::Developer).await? <= 1 {
        return Err(AppError::Conflict(
            "cannot delete the last developer".to_string(),
        ));
    }

    users.delete(id).await?;
    tracing::info!(user_id = %id, "user deleted");
    Ok(StatusCode::NO_CONTENT)
}
