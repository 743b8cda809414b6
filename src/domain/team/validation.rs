//! Team validation

use thiserror::Error;

/// Errors that can occur during team validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TeamValidationError {
    #[error("Team ID must be a positive integer, got {0}")]
    InvalidId(i64),

    #[error("Team name cannot be empty")]
    EmptyName,

    #[error("Team name cannot exceed {0} characters")]
    NameTooLong(usize),
}

const MAX_TEAM_NAME_LENGTH: usize = 100;

/// Validate a team ID
pub fn validate_team_id(id: i64) -> Result<(), TeamValidationError> {
    if id <= 0 {
        return Err(TeamValidationError::InvalidId(id));
    }

    Ok(())
}

/// Validate a team name
pub fn validate_team_name(name: &str) -> Result<(), TeamValidationError> {
    if name.is_empty() {
        return Err(TeamValidationError::EmptyName);
    }

    if name.chars().count() > MAX_TEAM_NAME_LENGTH {
        return Err(TeamValidationError::NameTooLong(MAX_TEAM_NAME_LENGTH));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_team_id() {
        assert!(validate_team_id(1).is_ok());
        assert!(validate_team_id(i64::MAX).is_ok());
    }

    #[test]
    fn test_invalid_team_id() {
        assert_eq!(validate_team_id(0), Err(TeamValidationError::InvalidId(0)));
        assert_eq!(
            validate_team_id(-3),
            Err(TeamValidationError::InvalidId(-3))
        );
    }

    #[test]
    fn test_valid_team_name() {
        assert!(validate_team_name("Engineering").is_ok());
        assert!(validate_team_name("Team with spaces & symbols!").is_ok());
    }

    #[test]
    fn test_empty_team_name() {
        assert_eq!(validate_team_name(""), Err(TeamValidationError::EmptyName));
    }

    #[test]
    fn test_team_name_too_long() {
        let long_name = "a".repeat(101);
        assert_eq!(
            validate_team_name(&long_name),
            Err(TeamValidationError::NameTooLong(100))
        );
    }
}
