//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (verifies database)
//!
//! # Auth (public)
//! POST /login                  - Exchange credentials for a session token
//!
//! # Session
//! GET  /me                     - The validated identity behind the token
//!
//! # Users (developer only)
//! GET    /api/users            - List users (optional ?role= filter)
//! POST   /api/users            - Create user
//! PUT    /api/users/{id}       - Update user
//! DELETE /api/users/{id}       - Delete user
//!
//! # Classes
//! GET    /api/classes                  - List all classes (developer)
//! POST   /api/classes                  - Create class (developer)
//! PUT    /api/classes/{id}             - Rename class (developer)
//! DELETE /api/classes/{id}             - Delete class (developer)
//! GET    /api/teachers/{id}/classes    - A teacher's classes (developer, or that teacher)
//!
//! # Rosters (developer, or the class's teacher)
//! GET    /api/classes/{id}/students
//! POST   /api/classes/{id}/students
//! DELETE /api/classes/{id}/students/{student_id}
//!
//! # Progress (developer, or the class's teacher)
//! GET    /api/classes/{id}/progress
//! POST   /api/classes/{id}/progress    - Record/replace a member's position
//! PUT    /api/progress/{id}            - Update an entry's position
//!
//! # Student view (student only)
//! GET    /api/students/me
//! ```
//!
//! There is deliberately no `/logout`: sessions are stateless tokens that
//! the client discards.

pub mod auth;
pub mod classes;
pub mod progress;
pub mod students;
pub mod users;

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::state::AppState;

/// Assemble the application router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/me", get(auth::me))
        .nest("/api", api_routes())
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(users::list).post(users::create))
        .route("/users/{id}", put(users::update).delete(users::remove))
        .route("/classes", get(classes::list).post(classes::create))
        .route("/classes/{id}", put(classes::update).delete(classes::remove))
        .route("/teachers/{id}/classes", get(classes::teacher_classes))
        .route(
            "/classes/{id}/students",
            get(classes::students).post(classes::add_student),
        )
        .route(
            "/classes/{id}/students/{student_id}",
            delete(classes::remove_student),
        )
        .route(
            "/classes/{id}/progress",
            get(progress::class_progress).post(progress::record),
        )
        .route("/progress/{id}", put(progress::update))
        .route("/students/me", get(students::me))
}
