//! User identity model.
//!
//! A user owns an ordered exercise log; the log itself lives behind the
//! [`crate::domain::ports::UserRepository`] port and is never carried on
//! [`User`].

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum username length in characters.
pub const USERNAME_MAX: usize = 64;

/// Validation errors returned by the identity constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    #[error("userId must not be empty")]
    EmptyId,
    #[error("username is required")]
    EmptyUsername,
    #[error("username must be at most {max} characters")]
    UsernameTooLong { max: usize },
}

/// Opaque user identifier, generated at registration and immutable after.
///
/// Identifiers are stored as text; lookups with an identifier that was never
/// issued simply miss rather than failing validation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Validate and construct a [`UserId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        Self::from_owned(id.as_ref().to_owned())
    }

    /// Generate a fresh identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    fn from_owned(id: String) -> Result<Self, UserValidationError> {
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Globally unique login name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`]; surrounding whitespace is dropped.
    pub fn new(username: impl Into<String>) -> Result<Self, UserValidationError> {
        Self::from_owned(username.into())
    }

    fn from_owned(username: String) -> Result<Self, UserValidationError> {
        let trimmed = username.trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        if trimmed.chars().count() > USERNAME_MAX {
            return Err(UserValidationError::UsernameTooLong { max: USERNAME_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl TryFrom<String> for Username {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Registered user identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    username: Username,
}

impl User {
    /// Build a user from validated components.
    pub fn new(id: UserId, username: Username) -> Self {
        Self { id, username }
    }

    /// Fallible constructor used by persistence adapters.
    pub fn try_from_strings(
        id: impl AsRef<str>,
        username: impl Into<String>,
    ) -> Result<Self, UserValidationError> {
        Ok(Self::new(UserId::new(id)?, Username::new(username)?))
    }

    /// Stable user identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Unique username.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Split into identifier and username.
    pub fn into_parts(self) -> (UserId, Username) {
        (self.id, self.username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", UserValidationError::EmptyId)]
    #[case("   ", UserValidationError::EmptyId)]
    fn user_id_rejects_blank(#[case] raw: &str, #[case] expected: UserValidationError) {
        assert_eq!(UserId::new(raw), Err(expected));
    }

    #[rstest]
    fn user_id_accepts_arbitrary_text() {
        let id = UserId::new(" rJ3kQ9x ").expect("non-empty id");
        assert_eq!(id.as_ref(), "rJ3kQ9x");
    }

    #[rstest]
    fn random_ids_are_distinct() {
        assert_ne!(UserId::random(), UserId::random());
    }

    #[rstest]
    fn username_is_trimmed() {
        let username = Username::new("  alice ").expect("valid username");
        assert_eq!(username.as_ref(), "alice");
    }

    #[rstest]
    fn username_rejects_blank() {
        assert_eq!(Username::new("   "), Err(UserValidationError::EmptyUsername));
    }

    #[rstest]
    fn username_rejects_overlong() {
        let raw = "a".repeat(USERNAME_MAX + 1);
        assert_eq!(
            Username::new(raw),
            Err(UserValidationError::UsernameTooLong { max: USERNAME_MAX })
        );
    }

    #[rstest]
    fn user_id_deserialises_through_validation() {
        let result: Result<UserId, _> = serde_json::from_str("\"  \"");
        assert!(result.is_err());
    }
}
