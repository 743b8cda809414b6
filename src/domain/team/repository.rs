//! Team repository trait

use async_trait::async_trait;

use super::entity::{NewTeam, Team, TeamId};
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Repository for the team hierarchy
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// Get a team by ID
    async fn get(&self, id: TeamId) -> Result<Option<Team>, DomainError>;

    /// Store a new team and assign its id.
    ///
    /// The parent lookup and the insert are atomic: fails with
    /// `ParentNotFound` and stores nothing if the parent does not exist.
    async fn create(&self, team: NewTeam) -> Result<Team, DomainError>;

    /// Teams without a parent, in ascending id order
    async fn list_roots(&self) -> Result<Vec<Team>, DomainError>;

    /// Direct children of a team, in ascending id order
    async fn children_of(&self, id: TeamId) -> Result<Vec<Team>, DomainError>;

    /// Count all teams
    async fn count(&self) -> Result<usize, DomainError>;

    /// Check if a team exists
    async fn exists(&self, id: TeamId) -> Result<bool, DomainError> {
        Ok(self.get(id).await?.is_some())
    }
}
