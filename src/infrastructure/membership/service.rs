//! Membership service: add, remove and list team members

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::membership::{AddOutcome, Membership, MembershipRepository};
use crate::domain::team::{Team, TeamId, TeamRepository};
use crate::domain::user::{User, UserRepository};
use crate::domain::DomainError;

/// Request naming a user and a team
#[derive(Debug, Clone)]
pub struct MemberRequest {
    pub username: String,
    pub team_id: i64,
}

/// Membership service for managing users on teams
#[derive(Clone)]
pub struct MembershipService {
    users: Arc<dyn UserRepository>,
    teams: Arc<dyn TeamRepository>,
    memberships: Arc<dyn MembershipRepository>,
}

impl std::fmt::Debug for MembershipService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MembershipService").finish_non_exhaustive()
    }
}

impl MembershipService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        teams: Arc<dyn TeamRepository>,
        memberships: Arc<dyn MembershipRepository>,
    ) -> Self {
        Self {
            users,
            teams,
            memberships,
        }
    }

    /// Add a user to a team. Adding an existing member succeeds without change.
    pub async fn add_member(&self, request: MemberRequest) -> Result<AddOutcome, DomainError> {
        let (user, team) = self.resolve(&request).await?;

        let outcome = AddOutcome::from_inserted(self.memberships.add(&user, team.id()).await?);

        match outcome {
            AddOutcome::Added => {
                info!(username = %user.username(), team_id = %team.id(), "Added team member")
            }
            AddOutcome::AlreadyMember => {
                debug!(username = %user.username(), team_id = %team.id(), "User already a member")
            }
        }

        Ok(outcome)
    }

    /// Remove a user from a team
    pub async fn remove_member(&self, request: MemberRequest) -> Result<(), DomainError> {
        let (user, team) = self.resolve(&request).await?;

        let removed = self
            .memberships
            .remove(Membership::new(user.id(), team.id()))
            .await?;

        if !removed {
            warn!(username = %user.username(), team_id = %team.id(), "Remove of non-member");
            return Err(DomainError::not_a_member(
                user.username(),
                team.id().value(),
            ));
        }

        info!(username = %user.username(), team_id = %team.id(), "Removed team member");
        Ok(())
    }

    /// Usernames of the team's members, in the order they were added
    pub async fn members_of(&self, team_id: TeamId) -> Result<Vec<String>, DomainError> {
        self.memberships.members_of(team_id).await
    }

    /// Whether the user is on the team
    pub async fn is_member(&self, user: &User, team_id: TeamId) -> Result<bool, DomainError> {
        self.memberships
            .is_member(Membership::new(user.id(), team_id))
            .await
    }

    async fn resolve(&self, request: &MemberRequest) -> Result<(User, Team), DomainError> {
        let user = self
            .users
            .get_by_username(&request.username)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("User '{}' not found", request.username)))?;

        let team_not_found = || DomainError::not_found(format!("Team {} not found", request.team_id));

        let team_id = TeamId::new(request.team_id).map_err(|_| team_not_found())?;
        let team = self.teams.get(team_id).await?.ok_or_else(team_not_found)?;

        Ok((user, team))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::membership::MockMembershipRepository;
    use crate::domain::team::NewTeam;
    use crate::domain::user::NewUser;
    use crate::infrastructure::membership::InMemoryMembershipRepository;
    use crate::infrastructure::team::InMemoryTeamRepository;
    use crate::infrastructure::user::InMemoryUserRepository;

    async fn seeded(
        memberships: Arc<dyn MembershipRepository>,
    ) -> (MembershipService, TeamId) {
        let users = Arc::new(InMemoryUserRepository::new());
        let teams = Arc::new(InMemoryTeamRepository::new());

        users.create(NewUser::new("alice", "hash")).await.unwrap();
        let team = teams.create(NewTeam::new("Platform").unwrap()).await.unwrap();

        (MembershipService::new(users, teams, memberships), team.id())
    }

    fn request(username: &str, team_id: i64) -> MemberRequest {
        MemberRequest {
            username: username.to_string(),
            team_id,
        }
    }

    #[tokio::test]
    async fn test_add_twice_is_idempotent() {
        let (service, team) = seeded(Arc::new(InMemoryMembershipRepository::new())).await;

        let first = service.add_member(request("alice", team.value())).await.unwrap();
        let second = service.add_member(request("alice", team.value())).await.unwrap();

        assert_eq!(first, AddOutcome::Added);
        assert_eq!(second, AddOutcome::AlreadyMember);
        assert_eq!(service.members_of(team).await.unwrap(), vec!["alice"]);
    }

    #[tokio::test]
    async fn test_add_unknown_user() {
        let (service, team) = seeded(Arc::new(InMemoryMembershipRepository::new())).await;

        let result = service.add_member(request("mallory", team.value())).await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_add_unknown_team() {
        let (service, _) = seeded(Arc::new(InMemoryMembershipRepository::new())).await;

        for team_id in [42, 0, -1] {
            let result = service.add_member(request("alice", team_id)).await;
            match result {
                Err(DomainError::NotFound { message }) => {
                    assert_eq!(message, format!("Team {} not found", team_id))
                }
                other => panic!("expected NotFound, got {:?}", other),
            }
        }
    }

    #[tokio::test]
    async fn test_remove_non_member() {
        let (service, team) = seeded(Arc::new(InMemoryMembershipRepository::new())).await;

        let result = service.remove_member(request("alice", team.value())).await;
        assert!(matches!(
            result,
            Err(DomainError::NotAMember { ref username, .. }) if username == "alice"
        ));
    }

    #[tokio::test]
    async fn test_add_then_remove() {
        let (service, team) = seeded(Arc::new(InMemoryMembershipRepository::new())).await;

        service.add_member(request("alice", team.value())).await.unwrap();
        service.remove_member(request("alice", team.value())).await.unwrap();

        assert!(service.members_of(team).await.unwrap().is_empty());

        // Removing again fails
        let result = service.remove_member(request("alice", team.value())).await;
        assert!(matches!(result, Err(DomainError::NotAMember { .. })));
    }

    #[tokio::test]
    async fn test_is_member() {
        let users = Arc::new(InMemoryUserRepository::new());
        let teams = Arc::new(InMemoryTeamRepository::new());
        let alice = users.create(NewUser::new("alice", "hash")).await.unwrap();
        let team = teams.create(NewTeam::new("Platform").unwrap()).await.unwrap();

        let service = MembershipService::new(
            users,
            teams,
            Arc::new(InMemoryMembershipRepository::new()),
        );

        assert!(!service.is_member(&alice, team.id()).await.unwrap());
        service
            .add_member(request("alice", team.id().value()))
            .await
            .unwrap();
        assert!(service.is_member(&alice, team.id()).await.unwrap());
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let mut memberships = MockMembershipRepository::new();
        memberships
            .expect_add()
            .returning(|_, _| Err(DomainError::storage("disk full")));

        let (service, team) = seeded(Arc::new(memberships)).await;

        let result = service.add_member(request("alice", team.value())).await;
        assert!(matches!(result, Err(DomainError::Storage { .. })));
    }
}
