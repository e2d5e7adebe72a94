//! User management commands.
//!
//! `user create` is the bootstrap path: the server has no sign-up route, so
//! the first developer account (and any account after it, if preferred over
//! the API) is created here.
//!
//! # Environment Variables
//!
//! - `HIFZ_DATABASE_URL` - `PostgreSQL` connection string (falls back to
//!   `DATABASE_URL`)

use sqlx::PgPool;

use hifz_core::{Role, UserId, Username};
use hifz_server::auth::password;
use hifz_server::db::UserRepository;

use super::{CommandError, database_url};

/// Characters used for generated passwords (alphanumeric + symbols).
const PASSWORD_CHARSET: &[u8] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!@#$%^&*";

/// Length of generated passwords.
const GENERATED_PASSWORD_LENGTH: usize = 16;

/// Create a new user.
///
/// When `password` is `None`, a random one is generated and logged once.
///
/// # Errors
///
/// Returns `CommandError` on invalid input, an existing username, or a
/// database failure.
pub async fn create_user(
    username: &str,
    name: &str,
    role: &str,
    phone: Option<&str>,
    password: Option<&str>,
) -> Result<UserId, CommandError> {
    // Parse and validate role and username before touching the database
    let role: Role = role
        .parse()
        .map_err(|_| CommandError::InvalidRole(role.to_owned()))?;
    let username =
        Username::parse(username).map_err(|e| CommandError::InvalidUsername(e.to_string()))?;

    let (password, generated) = match password {
        Some(p) => (p.to_owned(), false),
        None => (generate_password(), true),
    };
    password::validate_password(&password).map_err(CommandError::InvalidPassword)?;

    let database_url = database_url()?;

    tracing::info!("Connecting to database...");
    let pool = PgPool::connect(&database_url).await?;
    let users = UserRepository::new(&pool);

    // Check if the username is taken
    if users.get_by_username(&username).await?.is_some() {
        return Err(CommandError::UserExists(username.into_inner()));
    }

    let password_hash = password::hash_password(&password).map_err(|_| CommandError::Hashing)?;

    let user = users
        .create(&username, name, phone, role, &password_hash)
        .await?;

    tracing::info!(
        "User created successfully! ID: {}, Username: {}, Role: {}",
        user.id,
        user.username,
        user.role
    );
    if generated {
        tracing::warn!("Generated password (shown once, change it after first login): {password}");
    }

    Ok(user.id)
}

/// Generate a random password from the charset.
fn generate_password() -> String {
    use rand::Rng;

    let mut rng = rand::rng();
    (0..GENERATED_PASSWORD_LENGTH)
        .map(|_| {
            let idx = rng.random_range(0..PASSWORD_CHARSET.len());
            char::from(PASSWORD_CHARSET[idx])
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_password_meets_policy() {
        let password = generate_password();
        assert_eq!(password.len(), GENERATED_PASSWORD_LENGTH);
        assert!(password::validate_password(&password).is_ok());
    }

    #[test]
    fn test_generated_passwords_differ() {
        assert_ne!(generate_password(), generate_password());
    }
}
