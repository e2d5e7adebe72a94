//! Session-related types.
//!
//! [`CurrentUser`] is the explicit session context handed down to handlers:
//! one value, derived from a validated token, injected per request. Handlers
//! never reach into the transport or re-decode the token themselves.

use serde::Serialize;

use hifz_core::{Role, UserId, Username};

use crate::auth::token::Claims;

/// The validated identity of the requesting user.
///
/// A snapshot of the subject at token issuance: a role change server-side
/// is not reflected here until the subject logs in again.
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUser {
    /// The user's database ID.
    pub id: UserId,
    /// The user's login identifier.
    pub username: Username,
    /// The user's display name.
    pub name: String,
    /// The user's role.
    pub role: Role,
}

impl CurrentUser {
    /// Build from validated claims. Returns `None` if the subject claim
    /// does not hold a well-formed user ID.
    #[must_use]
    pub fn from_claims(claims: &Claims) -> Option<Self> {
        Some(Self {
            id: claims.subject_id()?,
            username: claims.username.clone(),
            name: claims.name.clone(),
            role: claims.role,
        })
    }
}
