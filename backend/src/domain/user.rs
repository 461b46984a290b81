//! Identity of an authenticated caller.
//!
//! Identities are issued by the external auth provider and treated as opaque
//! strings. The only local rule is that they are not blank.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Validation errors returned by [`UserId::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// The identifier was blank.
    #[error("user id must not be empty")]
    EmptyId,
}

/// Opaque user identifier owned by the auth provider.
///
/// # Examples
/// ```
/// use hydrocheck::domain::UserId;
///
/// let id = UserId::new("auth0|42").expect("valid id");
/// assert_eq!(id.as_ref(), "auth0|42");
/// assert!(UserId::new("  ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Validate and construct a [`UserId`].
    ///
    /// # Errors
    ///
    /// Returns [`UserValidationError::EmptyId`] when the value is blank.
    pub fn new(id: impl Into<String>) -> Result<Self, UserValidationError> {
        let value = id.into();
        if value.trim().is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        Ok(Self(value))
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("auth0|42")]
    #[case("3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    fn accepts_opaque_provider_ids(#[case] raw: &str) {
        let id = UserId::new(raw).expect("valid id");
        assert_eq!(id.to_string(), raw);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn rejects_blank_ids(#[case] raw: &str) {
        assert_eq!(UserId::new(raw), Err(UserValidationError::EmptyId));
    }

    #[rstest]
    fn deserialising_validates() {
        let parsed: Result<UserId, _> = serde_json::from_value(json!(""));
        assert!(parsed.is_err());

        let id: UserId = serde_json::from_value(json!("user-1")).expect("valid id");
        assert_eq!(serde_json::to_value(&id).expect("serialise"), json!("user-1"));
    }
}
