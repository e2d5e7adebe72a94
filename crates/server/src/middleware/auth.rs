//! Authentication extractors for protected routes.
//!
//! Each protected handler declares its required roles by taking one of
//! these extractors; the role gate runs before the handler body ever
//! executes, and no handler renders without reaching `Allow`.
//!
//! Outcome mapping (one distinct caller action per terminal state):
//! - `Allow` -> handler runs (200)
//! - no/invalid/expired token -> 401, with the three causes distinguished
//!   in the body so clients can re-prompt silently on expiry
//! - valid session, wrong role -> 403 "not permitted", never a login prompt

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};

use hifz_core::Role;

use crate::auth::{Gate, TokenError, authorize};
use crate::error::AppError;
use crate::models::CurrentUser;
use crate::state::AppState;

/// Pull the bearer token out of the Authorization header, if any.
fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Validate the presented token (if any) and run the role gate.
///
/// Token defects are surfaced as their own errors before the gate runs;
/// the gate then only distinguishes "no session" from "wrong role".
fn gate_request(
    parts: &Parts,
    state: &AppState,
    required: &[Role],
) -> Result<CurrentUser, AppError> {
    let session = match bearer_token(parts) {
        None => None,
        Some(token) => Some(state.auth().validate_session(token).map_err(|e| match e {
            TokenError::Invalid => AppError::SessionInvalid,
            TokenError::Expired => AppError::SessionExpired,
        })?),
    };

    match authorize(session.as_ref(), required) {
        Gate::Allow => {
            // authorize only allows with a present session
            session.ok_or_else(|| AppError::Internal("gate allowed empty session".to_string()))
        }
        Gate::DenyNoSession => Err(AppError::NoSession),
        Gate::DenyWrongRole => Err(AppError::Forbidden(
            "your role does not permit this action".to_string(),
        )),
    }
}

/// Extractor that requires any authenticated user.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(RequireAuth(user): RequireAuth) -> impl IntoResponse {
///     format!("Hello, {}!", user.name)
/// }
/// ```
pub struct RequireAuth(pub CurrentUser);

impl<S> FromRequestParts<S> for RequireAuth
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app = AppState::from_ref(state);
        gate_request(parts, &app, &Role::ALL).map(Self)
    }
}

/// Extractor that requires the developer role.
pub struct RequireDeveloper(pub CurrentUser);

impl<S> FromRequestParts<S> for RequireDeveloper
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app = AppState::from_ref(state);
        gate_request(parts, &app, &[Role::Developer]).map(Self)
    }
}

/// Extractor that requires the teacher role.
///
/// Developers pass too: they can reach every teacher view.
pub struct RequireTeacher(pub CurrentUser);

impl<S> FromRequestParts<S> for RequireTeacher
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app = AppState::from_ref(state);
        gate_request(parts, &app, &[Role::Developer, Role::Teacher]).map(Self)
    }
}

/// Extractor that requires the student role.
///
/// Student views are about the requester's own data, so only students pass.
pub struct RequireStudent(pub CurrentUser);

impl<S> FromRequestParts<S> for RequireStudent
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app = AppState::from_ref(state);
        gate_request(parts, &app, &[Role::Student]).map(Self)
    }
}
