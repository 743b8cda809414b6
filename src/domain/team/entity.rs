//! Team entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{validate_team_id, validate_team_name, TeamValidationError};

/// Team identifier - surrogate key assigned by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct TeamId(i64);

impl TeamId {
    /// Create a new TeamId after validation
    pub fn new(id: i64) -> Result<Self, TeamValidationError> {
        validate_team_id(id)?;
        Ok(Self(id))
    }

    /// Get the inner integer value
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for TeamId {
    type Error = TeamValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TeamId> for i64 {
    fn from(id: TeamId) -> Self {
        id.0
    }
}

impl std::fmt::Display for TeamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A team that has not been stored yet
#[derive(Debug, Clone)]
pub struct NewTeam {
    name: String,
    parent_id: Option<TeamId>,
}

impl NewTeam {
    /// Create a root team
    pub fn new(name: impl Into<String>) -> Result<Self, TeamValidationError> {
        let name = name.into();
        validate_team_name(&name)?;

        Ok(Self {
            name,
            parent_id: None,
        })
    }

    /// Attach the team under a parent (builder pattern)
    pub fn with_parent(mut self, parent_id: TeamId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent_id(&self) -> Option<TeamId> {
        self.parent_id
    }
}

/// Team entity - a node in the team forest
///
/// The hierarchy edge lives on the child: a team points at its parent by id and
/// never holds its children.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    /// Unique identifier
    id: TeamId,
    /// Display name, not unique
    name: String,
    /// Parent team, `None` for roots
    parent_id: Option<TeamId>,
    /// Creation timestamp
    created_at: DateTime<Utc>,
}

impl Team {
    /// Build a stored team from its parts
    pub fn new(
        id: TeamId,
        name: impl Into<String>,
        parent_id: Option<TeamId>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            parent_id,
            created_at,
        }
    }

    /// Assign an id to a pending team
    pub fn from_new(id: TeamId, new_team: NewTeam) -> Self {
        Self::new(id, new_team.name, new_team.parent_id, Utc::now())
    }

    // Getters

    pub fn id(&self) -> TeamId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent_id(&self) -> Option<TeamId> {
        self.parent_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Check if this team has no parent
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_id_valid() {
        let id = TeamId::new(5).unwrap();
        assert_eq!(id.value(), 5);
        assert_eq!(id.to_string(), "5");
    }

    #[test]
    fn test_team_id_invalid() {
        assert!(TeamId::new(0).is_err());
        assert!(TeamId::new(-1).is_err());
    }

    #[test]
    fn test_team_id_deserialize_rejects_zero() {
        assert!(serde_json::from_str::<TeamId>("0").is_err());
        assert_eq!(serde_json::from_str::<TeamId>("12").unwrap().value(), 12);
    }

    #[test]
    fn test_new_team_root() {
        let new_team = NewTeam::new("Engineering").unwrap();
        assert_eq!(new_team.name(), "Engineering");
        assert!(new_team.parent_id().is_none());
    }

    #[test]
    fn test_new_team_with_parent() {
        let parent = TeamId::new(1).unwrap();
        let new_team = NewTeam::new("Platform").unwrap().with_parent(parent);
        assert_eq!(new_team.parent_id(), Some(parent));
    }

    #[test]
    fn test_new_team_invalid_name() {
        assert_eq!(
            NewTeam::new("").unwrap_err(),
            TeamValidationError::EmptyName
        );
    }

    #[test]
    fn test_team_from_new() {
        let team = Team::from_new(TeamId::new(3).unwrap(), NewTeam::new("Ops").unwrap());

        assert_eq!(team.id().value(), 3);
        assert_eq!(team.name(), "Ops");
        assert!(team.is_root());
    }
}
