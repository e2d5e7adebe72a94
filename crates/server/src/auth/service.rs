//! The credential and session authority.
//!
//! Single entry point for verifying credentials and issuing/validating
//! session tokens. This replaces every ad hoc login path with one flow:
//! directory lookup by unique username, Argon2 verification, stateless
//! token issuance.

use std::time::Duration;

use secrecy::SecretString;

use hifz_core::Username;

use super::password::{self, PasswordHashError};
use super::token::{SigningError, TokenError, TokenSigner};
use crate::db::{RepositoryError, UserRepository};
use crate::models::{CurrentUser, User};

/// Outcome of a credential verification.
///
/// Unknown username and wrong password both collapse into `Rejected`;
/// nothing downstream can tell which it was.
#[derive(Debug)]
pub enum AuthResult {
    /// The credentials matched a stored record.
    Authenticated(User),
    /// Wrong username or wrong password.
    Rejected,
}

/// Verifies credentials and issues/validates session tokens.
pub struct AuthService {
    signer: TokenSigner,
    /// A real Argon2 hash matching no user. Verifying against it makes the
    /// unknown-username path cost the same as a wrong-password check, so
    /// response timing does not reveal which usernames exist.
    dummy_hash: String,
}

impl AuthService {
    /// Create the service from the configured signing secret and token
    /// lifetime.
    ///
    /// # Errors
    ///
    /// Returns `PasswordHashError` if the placeholder hash cannot be
    /// computed; callers treat this as a fatal startup error.
    pub fn new(secret: &SecretString, ttl: Duration) -> Result<Self, PasswordHashError> {
        Ok(Self {
            signer: TokenSigner::new(secret, ttl),
            dummy_hash: password::hash_password("placeholder-cost-equalizer")?,
        })
    }

    /// Verify a (username, password) attempt against the user directory.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` only for storage failures; every
    /// credential mismatch is a normal `Rejected` result.
    pub async fn verify_credentials(
        &self,
        users: &UserRepository<'_>,
        username: &str,
        password: &str,
    ) -> Result<AuthResult, RepositoryError> {
        // An identifier that can't exist still burns a verification, same
        // as an unknown one.
        let Ok(username) = Username::parse(username) else {
            let _ = password::verify_password(password, &self.dummy_hash);
            return Ok(AuthResult::Rejected);
        };

        let record = users.get_with_password_hash(&username).await?;
        Ok(self.evaluate(record, password))
    }

    /// Decide an attempt given the directory lookup result.
    fn evaluate(&self, record: Option<(User, String)>, password: &str) -> AuthResult {
        match record {
            Some((user, hash)) => {
                if password::verify_password(password, &hash) {
                    AuthResult::Authenticated(user)
                } else {
                    AuthResult::Rejected
                }
            }
            None => {
                let _ = password::verify_password(password, &self.dummy_hash);
                AuthResult::Rejected
            }
        }
    }

    /// Issue a session token for an authenticated user.
    ///
    /// # Errors
    ///
    /// Returns `SigningError` if encoding fails.
    pub fn issue_session(&self, user: &User) -> Result<String, SigningError> {
        self.signer
            .issue(user.id, &user.username, &user.name, user.role)
    }

    /// Validate a presented session token into the requesting identity.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Invalid` or `TokenError::Expired`; see
    /// [`TokenSigner::validate`].
    pub fn validate_session(&self, token: &str) -> Result<CurrentUser, TokenError> {
        let claims = self.signer.validate(token)?;
        CurrentUser::from_claims(&claims).ok_or(TokenError::Invalid)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use hifz_core::{Role, UserId};

    fn service() -> AuthService {
        AuthService::new(
            &SecretString::from("k9#mP2$vX8@qL5!wN3^rT7&bZ4*jH6%d"),
            Duration::from_secs(24 * 60 * 60),
        )
        .unwrap()
    }

    fn teacher1() -> User {
        let now = Utc::now();
        User {
            id: UserId::new(42),
            username: Username::parse("teacher1").unwrap(),
            name: "Ustadh Kareem".to_string(),
            phone: None,
            role: Role::Teacher,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_matching_credentials_authenticate_with_exact_identity() {
        let service = service();
        let user = teacher1();
        let hash = password::hash_password("correct-password").unwrap();

        let result = service.evaluate(Some((user, hash)), "correct-password");
        match result {
            AuthResult::Authenticated(u) => {
                assert_eq!(u.id, UserId::new(42));
                assert_eq!(u.role, Role::Teacher);
            }
            AuthResult::Rejected => panic!("expected Authenticated"),
        }
    }

    #[test]
    fn test_wrong_password_is_rejected() {
        let service = service();
        let hash = password::hash_password("correct-password").unwrap();

        assert!(matches!(
            service.evaluate(Some((teacher1(), hash)), "wrong-password"),
            AuthResult::Rejected
        ));
    }

    #[test]
    fn test_unknown_user_is_rejected() {
        let service = service();
        assert!(matches!(
            service.evaluate(None, "any-password"),
            AuthResult::Rejected
        ));
    }

    #[test]
    fn test_dummy_hash_is_a_real_hash_matching_nothing() {
        let service = service();
        assert!(service.dummy_hash.starts_with("$argon2"));
        // The equalizer verification must run the full algorithm and fail
        assert!(!password::verify_password("any-password", &service.dummy_hash));
    }

    #[test]
    fn test_issue_then_validate_roundtrip() {
        let service = service();
        let user = teacher1();

        let token = service.issue_session(&user).unwrap();
        let current = service.validate_session(&token).unwrap();

        assert_eq!(current.id, user.id);
        assert_eq!(current.username, user.username);
        assert_eq!(current.role, Role::Teacher);
    }

    #[test]
    fn test_validate_rejects_tampering() {
        let service = service();
        let token = service.issue_session(&teacher1()).unwrap();
        let mut tampered = token.clone();
        tampered.pop();

        assert_eq!(
            service.validate_session(&tampered).unwrap_err(),
            TokenError::Invalid
        );
    }
}
