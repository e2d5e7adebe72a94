//! The role gate.
//!
//! Every protected view declares its required role set; the gate decides,
//! per request, between exactly three terminal outcomes:
//!
//! - `Allow` - render the view (HTTP 200)
//! - `DenyNoSession` - no valid session; the caller re-authenticates (401)
//! - `DenyWrongRole` - authenticated but unprivileged; the caller shows a
//!   "not permitted" view, NOT the login prompt (403)
//!
//! The `DenyNoSession`/`DenyWrongRole` distinction is load-bearing:
//! bouncing an authenticated user back to login tells them nothing and
//! loses their place.

use hifz_core::Role;

use crate::models::session::CurrentUser;

/// Outcome of a role-gate check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    /// The session's role is in the required set.
    Allow,
    /// No valid session was presented.
    DenyNoSession,
    /// A valid session exists but its role is not in the required set.
    DenyWrongRole,
}

/// Authorize a validated session (or its absence) against a required role
/// set.
///
/// Pure and total: every (session, required) pair maps to exactly one
/// outcome, with no default branch a new role could fall through.
#[must_use]
pub fn authorize(session: Option<&CurrentUser>, required: &[Role]) -> Gate {
    let Some(user) = session else {
        return Gate::DenyNoSession;
    };

    // Exhaustive on the closed role set: membership, not a wildcard match
    if required.contains(&user.role) {
        Gate::Allow
    } else {
        Gate::DenyWrongRole
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use hifz_core::{UserId, Username};

    fn user(role: Role) -> CurrentUser {
        CurrentUser {
            id: UserId::new(1),
            username: Username::parse("someone").unwrap(),
            name: "Someone".to_string(),
            role,
        }
    }

    #[test]
    fn test_no_session_denies_with_no_session() {
        assert_eq!(
            authorize(None, &[Role::Developer]),
            Gate::DenyNoSession
        );
        assert_eq!(authorize(None, &Role::ALL), Gate::DenyNoSession);
    }

    #[test]
    fn test_matching_role_allows() {
        let teacher = user(Role::Teacher);
        assert_eq!(
            authorize(Some(&teacher), &[Role::Teacher]),
            Gate::Allow
        );
        assert_eq!(
            authorize(Some(&teacher), &[Role::Developer, Role::Teacher]),
            Gate::Allow
        );
    }

    #[test]
    fn test_student_on_developer_view_is_wrong_role_not_no_session() {
        let student = user(Role::Student);
        assert_eq!(
            authorize(Some(&student), &[Role::Developer]),
            Gate::DenyWrongRole
        );
    }

    #[test]
    fn test_empty_required_set_denies_everyone() {
        let dev = user(Role::Developer);
        assert_eq!(authorize(Some(&dev), &[]), Gate::DenyWrongRole);
    }

    #[test]
    fn test_every_role_against_every_single_role_gate() {
        for holder in Role::ALL {
            let u = user(holder);
            for required in Role::ALL {
                let expected = if holder == required {
                    Gate::Allow
                } else {
                    Gate::DenyWrongRole
                };
                assert_eq!(authorize(Some(&u), &[required]), expected);
            }
        }
    }
}
