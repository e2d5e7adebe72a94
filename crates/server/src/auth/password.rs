//! Password hashing with Argon2id.
//!
//! Hashes are PHC strings with a per-hash random salt embedded in the
//! output, so no external salt storage is needed. Neither plaintext nor
//! hash material is ever logged.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

/// Minimum password length for new or changed passwords.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Error hashing a password.
#[derive(Debug, thiserror::Error)]
#[error("password hashing failed")]
pub struct PasswordHashError;

/// Validate that a new password meets requirements.
///
/// # Errors
///
/// Returns the human-readable requirement that was not met.
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        ));
    }

    Ok(())
}

/// Hash a password using Argon2id.
///
/// # Errors
///
/// Returns `PasswordHashError` if hashing fails (the error carries no
/// password material).
pub fn hash_password(password: &str) -> Result<String, PasswordHashError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| PasswordHashError)
}

/// Verify a password against a stored hash.
///
/// Returns `false` for a malformed stored hash rather than erroring, so a
/// corrupt credential row behaves exactly like a wrong password.
#[must_use]
pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}
