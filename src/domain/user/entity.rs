//! User entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::UserValidationError;

/// User identifier - surrogate key assigned by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct UserId(i64);

impl UserId {
    /// Create a new UserId after validation
    pub fn new(id: i64) -> Result<Self, UserValidationError> {
        if id <= 0 {
            return Err(UserValidationError::InvalidId(id));
        }

        Ok(Self(id))
    }

    /// Get the inner integer value
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for UserId {
    type Error = UserValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserId> for i64 {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A user that has not been stored yet
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
}

impl NewUser {
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password_hash: password_hash.into(),
        }
    }
}

/// User entity for authentication
///
/// Users are immutable once registered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    id: UserId,
    /// Username for login, unique and case-sensitive
    username: String,
    /// Argon2 password hash - never exposed in serialization
    #[serde(skip_serializing, default)]
    password_hash: String,
    /// Registration timestamp
    created_at: DateTime<Utc>,
}

impl User {
    /// Build a stored user from its parts
    pub fn new(
        id: UserId,
        username: impl Into<String>,
        password_hash: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            username: username.into(),
            password_hash: password_hash.into(),
            created_at,
        }
    }

    /// Assign an id to a pending user
    pub fn from_new(id: UserId, new_user: NewUser) -> Self {
        Self::new(id, new_user.username, new_user.password_hash, Utc::now())
    }

    // Getters

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_valid() {
        let id = UserId::new(42).unwrap();
        assert_eq!(id.value(), 42);
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn test_user_id_rejects_non_positive() {
        assert_eq!(UserId::new(0), Err(UserValidationError::InvalidId(0)));
        assert!(UserId::new(-5).is_err());
    }

    #[test]
    fn test_user_from_new() {
        let user = User::from_new(UserId::new(1).unwrap(), NewUser::new("alice", "$argon2id$hash"));

        assert_eq!(user.id().value(), 1);
        assert_eq!(user.username(), "alice");
        assert_eq!(user.password_hash(), "$argon2id$hash");
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let user = User::from_new(UserId::new(1).unwrap(), NewUser::new("alice", "secret-hash"));
        let json = serde_json::to_string(&user).unwrap();

        assert!(json.contains("alice"));
        assert!(!json.contains("secret-hash"));
        assert!(!json.contains("password_hash"));
    }
}
