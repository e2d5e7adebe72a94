//! Login identifier type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Username`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum UsernameError {
    /// The input string is empty.
    #[error("username cannot be empty")]
    Empty,
    /// The input string is too short.
    #[error("username must be at least {min} characters")]
    TooShort {
        /// Minimum allowed length.
        min: usize,
    },
    /// The input string is too long.
    #[error("username must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains a character outside `[a-z0-9._-]`.
    #[error("username may only contain lowercase letters, digits, '.', '_' and '-'")]
    InvalidCharacter,
    /// The input does not start with a letter or digit.
    #[error("username must start with a letter or digit")]
    InvalidStart,
}

/// A login identifier (username).
///
/// Usernames identify subjects at login and are unique across all users.
/// Matching is case-sensitive; to keep the uniqueness constraint and the
/// login lookup trivially consistent, uppercase characters are rejected at
/// the boundary rather than folded.
///
/// ## Constraints
///
/// - Length: 3-32 characters
/// - Allowed characters: `a-z`, `0-9`, `.`, `_`, `-`
/// - Must start with a letter or digit
///
/// ## Examples
///
/// ```
/// use hifz_core::Username;
///
/// assert!(Username::parse("teacher1").is_ok());
/// assert!(Username::parse("abu.bakr_3").is_ok());
///
/// assert!(Username::parse("").is_err());         // empty
/// assert!(Username::parse("ab").is_err());       // too short
/// assert!(Username::parse("Teacher1").is_err()); // uppercase
/// assert!(Username::parse("-dash").is_err());    // bad first char
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    /// Minimum length of a username.
    pub const MIN_LENGTH: usize = 3;

    /// Maximum length of a username.
    pub const MAX_LENGTH: usize = 32;

    /// Parse a `Username` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input:
    /// - Is empty, shorter than 3, or longer than 32 characters
    /// - Contains a character outside `[a-z0-9._-]`
    /// - Does not start with a letter or digit
    pub fn parse(s: &str) -> Result<Self, UsernameError> {
        if s.is_empty() {
            return Err(UsernameError::Empty);
        }

        if s.len() < Self::MIN_LENGTH {
            return Err(UsernameError::TooShort {
                min: Self::MIN_LENGTH,
            });
        }

        if s.len() > Self::MAX_LENGTH {
            return Err(UsernameError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        if !s
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '.' | '_' | '-'))
        {
            return Err(UsernameError::InvalidCharacter);
        }

        if !s.starts_with(|c: char| c.is_ascii_lowercase() || c.is_ascii_digit()) {
            return Err(UsernameError::InvalidStart);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the username as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Username` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Username {
    type Err = UsernameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
