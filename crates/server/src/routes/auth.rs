//! Authentication route handlers.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::auth::AuthResult;
use crate::db::UserRepository;
use crate::error::AppError;
use crate::middleware::RequireAuth;
use crate::models::CurrentUser;
use crate::state::AppState;

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response body.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// The session token; presented back verbatim as `Authorization:
    /// Bearer <token>` on every protected request.
    pub token: String,
}

/// Exchange credentials for a session token.
///
/// Every rejection - unknown username or wrong password - returns the same
/// 401 body.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let users = UserRepository::new(state.pool());

    match state
        .auth()
        .verify_credentials(&users, &req.username, &req.password)
        .await?
    {
        AuthResult::Authenticated(user) => {
            let token = state
                .auth()
                .issue_session(&user)
                .map_err(|e| AppError::Internal(e.to_string()))?;

            tracing::info!(user_id = %user.id, role = %user.role, "login succeeded");
            Ok(Json(LoginResponse { token }))
        }
        AuthResult::Rejected => {
            // One log line, no cause: the reason stays server-side too
            tracing::info!("login rejected");
            Err(AppError::InvalidCredentials)
        }
    }
}

/// The validated identity behind the presented token.
pub async fn me(RequireAuth(user): RequireAuth) -> Json<CurrentUser> {
    Json(user)
}
