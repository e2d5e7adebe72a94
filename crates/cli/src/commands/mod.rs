//! CLI command implementations.

pub mod migrate;
pub mod seed;
pub mod user;

use thiserror::Error;

/// Errors shared by CLI commands.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration error.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Repository error.
    #[error("Repository error: {0}")]
    Repository(#[from] hifz_server::db::RepositoryError),

    /// Invalid role.
    #[error("Invalid role: {0}. Valid roles: developer, teacher, student")]
    InvalidRole(String),

    /// Invalid username.
    #[error("Invalid username: {0}")]
    InvalidUsername(String),

    /// Invalid password.
    #[error("Invalid password: {0}")]
    InvalidPassword(String),

    /// User already exists.
    #[error("User already exists with username: {0}")]
    UserExists(String),

    /// Password hashing failed.
    #[error("Password hashing failed")]
    Hashing,

    /// Seeding failed.
    #[error("Seed error: {0}")]
    Seed(String),
}

/// Resolve the database URL from `HIFZ_DATABASE_URL` or `DATABASE_URL`.
pub(crate) fn database_url() -> Result<String, CommandError> {
    dotenvy::dotenv().ok();
    std::env::var("HIFZ_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map_err(|_| CommandError::MissingEnvVar("HIFZ_DATABASE_URL"))
}
