use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Username '{username}' is already taken")]
    DuplicateUsername { username: String },

    #[error("Incorrect username or password")]
    InvalidCredentials,

    #[error("Invalid token: {message}")]
    InvalidToken { message: String },

    #[error("User '{username}' not found")]
    UnknownUser { username: String },

    #[error("Invalid parent ID {parent_id}")]
    InvalidParent { parent_id: i64 },

    #[error("Parent team {parent_id} not found")]
    ParentNotFound { parent_id: i64 },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("User '{username}' is not a member of team {team_id}")]
    NotAMember { username: String, team_id: i64 },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn duplicate_username(username: impl Into<String>) -> Self {
        Self::DuplicateUsername {
            username: username.into(),
        }
    }

    pub fn invalid_token(message: impl Into<String>) -> Self {
        Self::InvalidToken {
            message: message.into(),
        }
    }

    pub fn unknown_user(username: impl Into<String>) -> Self {
        Self::UnknownUser {
            username: username.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn not_a_member(username: impl Into<String>, team_id: i64) -> Self {
        Self::NotAMember {
            username: username.into(),
            team_id,
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error() {
        let error = DomainError::not_found("Team 7 not found");
        assert_eq!(error.to_string(), "Not found: Team 7 not found");
    }

    #[test]
    fn test_parent_not_found_error() {
        let error = DomainError::ParentNotFound { parent_id: 999999 };
        assert_eq!(error.to_string(), "Parent team 999999 not found");
    }

    #[test]
    fn test_not_a_member_error() {
        let error = DomainError::not_a_member("alice", 3);
        assert_eq!(
            error.to_string(),
            "User 'alice' is not a member of team 3"
        );
    }

    #[test]
    fn test_duplicate_username_error() {
        let error = DomainError::duplicate_username("bob");
        assert_eq!(error.to_string(), "Username 'bob' is already taken");
    }
}
