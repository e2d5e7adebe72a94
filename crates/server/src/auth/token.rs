//! Stateless session tokens.
//!
//! A session is an HS256-signed JWT holding the subject's identity and a
//! snapshot of their role at issuance time. The server keeps no per-session
//! state: validity is entirely determined by the signature and the embedded
//! expiry.
//!
//! Validation order matters: the signature is verified before any claim is
//! read, so a forged `role` claim can never be trusted. Expiry is then
//! checked with a closed boundary - a token is valid strictly while
//! `now < exp`, and one with `exp == now` is already expired.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use hifz_core::{Role, UserId, Username};

/// Claims carried by a session token.
///
/// `role` and `name` are snapshots taken at issuance; a server-side role
/// change is not reflected until the subject logs in again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user's ID, as a string per JWT convention.
    pub sub: String,
    /// Login identifier at issuance.
    pub username: Username,
    /// Display name at issuance.
    pub name: String,
    /// Role at issuance.
    pub role: Role,
    /// Issued-at, unix seconds.
    pub iat: i64,
    /// Expiry, unix seconds. Strictly greater than `iat`.
    pub exp: i64,
}

impl Claims {
    /// The subject ID, if `sub` holds a well-formed ID.
    #[must_use]
    pub fn subject_id(&self) -> Option<UserId> {
        self.sub.parse::<i32>().ok().map(UserId::new)
    }
}

/// Why a presented token was rejected.
///
/// `Invalid` (malformed or bad signature) and `Expired` (well-formed but
/// past expiry) are distinguished so callers can prompt differently; both
/// force re-authentication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    /// Malformed token or signature mismatch.
    #[error("invalid session token")]
    Invalid,
    /// Signature verified, but the token is past its expiry.
    #[error("session expired")]
    Expired,
}

/// Error signing a token. Should not occur with a well-formed key; treated
/// as an internal error by callers.
#[derive(Debug, thiserror::Error)]
#[error("token signing failed")]
pub struct SigningError;

/// Issues and validates session tokens with a server-held secret.
pub struct TokenSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl_secs: i64,
}

impl TokenSigner {
    /// Create a signer from the configured secret and token lifetime.
    #[must_use]
    pub fn new(secret: &SecretString, ttl: std::time::Duration) -> Self {
        let secret_bytes = secret.expose_secret().as_bytes();

        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked manually in validate_at: the library's leeway
        // would soften the closed now >= exp boundary.
        validation.validate_exp = false;

        Self {
            encoding: EncodingKey::from_secret(secret_bytes),
            decoding: DecodingKey::from_secret(secret_bytes),
            validation,
            ttl_secs: i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX),
        }
    }

    /// Issue a token for an authenticated subject.
    ///
    /// # Errors
    ///
    /// Returns `SigningError` if encoding fails.
    pub fn issue(
        &self,
        user_id: UserId,
        username: &Username,
        name: &str,
        role: Role,
    ) -> Result<String, SigningError> {
        self.issue_at(user_id, username, name, role, Utc::now().timestamp())
    }

    /// Issue a token with an explicit issued-at instant.
    ///
    /// # Errors
    ///
    /// Returns `SigningError` if encoding fails.
    pub fn issue_at(
        &self,
        user_id: UserId,
        username: &Username,
        name: &str,
        role: Role,
        now: i64,
    ) -> Result<String, SigningError> {
        let claims = Claims {
            sub: user_id.to_string(),
            username: username.clone(),
            name: name.to_owned(),
            role,
            iat: now,
            exp: now.saturating_add(self.ttl_secs),
        };

        encode(&Header::default(), &claims, &self.encoding).map_err(|_| SigningError)
    }

    /// Validate a presented token and extract its claims.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Invalid` for a malformed or tampered token and
    /// `TokenError::Expired` for an otherwise-valid token past its expiry.
    pub fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        self.validate_at(token, Utc::now().timestamp())
    }

    /// Validate a token against an explicit instant.
    ///
    /// Pure computation: no I/O, no side effects, same result on repeated
    /// calls with the same inputs.
    ///
    /// # Errors
    ///
    /// See [`TokenSigner::validate`].
    pub fn validate_at(&self, token: &str, now: i64) -> Result<Claims, TokenError> {
        // Integrity first: reject forged or tampered tokens before
        // inspecting any claim.
        let data = decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|_| TokenError::Invalid)?;

        if now >= data.claims.exp {
            return Err(TokenError::Expired);
        }

        Ok(data.claims)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const TTL: std::time::Duration = std::time::Duration::from_secs(24 * 60 * 60);

    fn signer() -> TokenSigner {
        TokenSigner::new(
            &SecretString::from("k9#mP2$vX8@qL5!wN3^rT7&bZ4*jH6%d"),
            TTL,
        )
    }

    fn teacher1() -> (UserId, Username) {
        (UserId::new(42), Username::parse("teacher1").unwrap())
    }

    #[test]
    fn test_issue_validate_roundtrip() {
        let signer = signer();
        let (id, username) = teacher1();

        let token = signer.issue(id, &username, "Ustadh Kareem", Role::Teacher).unwrap();
        let claims = signer.validate(&token).unwrap();

        assert_eq!(claims.subject_id(), Some(id));
        assert_eq!(claims.username, username);
        assert_eq!(claims.name, "Ustadh Kareem");
        assert_eq!(claims.role, Role::Teacher);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_validate_is_idempotent() {
        let signer = signer();
        let (id, username) = teacher1();
        let token = signer.issue(id, &username, "Ustadh Kareem", Role::Teacher).unwrap();

        let first = signer.validate(&token).unwrap();
        let second = signer.validate(&token).unwrap();
        assert_eq!(first.sub, second.sub);
        assert_eq!(first.role, second.role);
        assert_eq!(first.exp, second.exp);
    }

    #[test]
    fn test_tampered_signature_is_invalid() {
        let signer = signer();
        let (id, username) = teacher1();
        let token = signer.issue(id, &username, "Ustadh Kareem", Role::Teacher).unwrap();

        // Flip one character of the signature segment
        let sig_start = token.rfind('.').unwrap() + 1;
        let (head, sig) = token.split_at(sig_start);
        let flipped: String = sig
            .char_indices()
            .map(|(i, c)| if i == 0 { if c == 'A' { 'B' } else { 'A' } } else { c })
            .collect();
        let tampered = format!("{head}{flipped}");
        assert_ne!(tampered, token);

        assert_eq!(signer.validate(&tampered), Err(TokenError::Invalid));
    }

    #[test]
    fn test_tampered_payload_is_invalid() {
        let signer = signer();
        let (id, username) = teacher1();
        let token = signer.issue(id, &username, "Talib", Role::Student).unwrap();

        // Swap in a different payload segment while keeping the signature
        let parts: Vec<&str> = token.split('.').collect();
        let other = signer.issue(id, &username, "Talib", Role::Developer).unwrap();
        let other_parts: Vec<&str> = other.split('.').collect();
        let spliced = format!(
            "{}.{}.{}",
            parts[0], other_parts[1], parts[2]
        );

        assert_eq!(signer.validate(&spliced), Err(TokenError::Invalid));
    }

    #[test]
    fn test_garbage_is_invalid() {
        let signer = signer();
        assert_eq!(signer.validate(""), Err(TokenError::Invalid));
        assert_eq!(signer.validate("not.a.token"), Err(TokenError::Invalid));
        assert_eq!(signer.validate("a.b"), Err(TokenError::Invalid));
    }

    #[test]
    fn test_wrong_secret_is_invalid() {
        let signer = signer();
        let other = TokenSigner::new(
            &SecretString::from("z1!qA9@wS8#eD7$rF6%tG5^yH4&uJ3*k"),
            TTL,
        );
        let (id, username) = teacher1();
        let token = signer.issue(id, &username, "Ustadh Kareem", Role::Teacher).unwrap();

        assert_eq!(other.validate(&token), Err(TokenError::Invalid));
    }

    #[test]
    fn test_expired_token() {
        let signer = signer();
        let (id, username) = teacher1();

        let now = Utc::now().timestamp();
        // Issued far enough back that exp is 1 second in the past
        let issued = now - i64::try_from(TTL.as_secs()).unwrap() - 1;
        let token = signer
            .issue_at(id, &username, "Ustadh Kareem", Role::Teacher, issued)
            .unwrap();

        assert_eq!(signer.validate_at(&token, now), Err(TokenError::Expired));
    }

    #[test]
    fn test_expiry_boundary_is_closed() {
        let signer = signer();
        let (id, username) = teacher1();

        let issued = 1_700_000_000;
        let exp = issued + i64::try_from(TTL.as_secs()).unwrap();
        let token = signer
            .issue_at(id, &username, "Ustadh Kareem", Role::Teacher, issued)
            .unwrap();

        // One second before expiry: still valid
        assert!(signer.validate_at(&token, exp - 1).is_ok());
        // Exactly at expiry: already expired
        assert_eq!(signer.validate_at(&token, exp), Err(TokenError::Expired));
        // Past expiry
        assert_eq!(signer.validate_at(&token, exp + 1), Err(TokenError::Expired));
    }

    #[test]
    fn test_expired_with_wrong_signature_is_invalid_not_expired() {
        // Integrity is checked before expiry
        let signer = signer();
        let other = TokenSigner::new(
            &SecretString::from("z1!qA9@wS8#eD7$rF6%tG5^yH4&uJ3*k"),
            TTL,
        );
        let (id, username) = teacher1();
        let token = signer
            .issue_at(id, &username, "Ustadh Kareem", Role::Teacher, 0)
            .unwrap();

        assert_eq!(
            other.validate_at(&token, Utc::now().timestamp()),
            Err(TokenError::Invalid)
        );
    }
}
