//! Membership repository trait

use async_trait::async_trait;

use super::entity::Membership;
use crate::domain::team::TeamId;
use crate::domain::user::User;
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Repository for the user/team membership relation
#[cfg_attr(test, automock)]
#[async_trait]
pub trait MembershipRepository: Send + Sync {
    /// Insert the pair unless it already exists.
    ///
    /// Returns `true` if a row was inserted. The existence check and the insert
    /// are atomic.
    async fn add(&self, user: &User, team_id: TeamId) -> Result<bool, DomainError>;

    /// Delete the pair. Returns `false` if it did not exist.
    async fn remove(&self, membership: Membership) -> Result<bool, DomainError>;

    /// Check whether the pair exists
    async fn is_member(&self, membership: Membership) -> Result<bool, DomainError>;

    /// Usernames of the team's members, in the order they were added
    async fn members_of(&self, team_id: TeamId) -> Result<Vec<String>, DomainError>;
}
