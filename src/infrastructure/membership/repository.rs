//! In-memory membership repository implementation

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::membership::{Membership, MembershipRepository};
use crate::domain::team::TeamId;
use crate::domain::user::{User, UserId};
use crate::domain::DomainError;

#[derive(Debug, Clone)]
struct MemberRecord {
    user_id: UserId,
    team_id: TeamId,
    /// Usernames never change, so it is kept alongside the pair
    username: String,
}

impl MemberRecord {
    fn matches(&self, membership: Membership) -> bool {
        self.user_id == membership.user_id && self.team_id == membership.team_id
    }
}

/// In-memory implementation of MembershipRepository.
///
/// Records are kept in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryMembershipRepository {
    records: RwLock<Vec<MemberRecord>>,
}

impl InMemoryMembershipRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MembershipRepository for InMemoryMembershipRepository {
    async fn add(&self, user: &User, team_id: TeamId) -> Result<bool, DomainError> {
        let membership = Membership::new(user.id(), team_id);
        let mut records = self.records.write().await;

        if records.iter().any(|r| r.matches(membership)) {
            return Ok(false);
        }

        records.push(MemberRecord {
            user_id: user.id(),
            team_id,
            username: user.username().to_string(),
        });

        Ok(true)
    }

    async fn remove(&self, membership: Membership) -> Result<bool, DomainError> {
        let mut records = self.records.write().await;

        match records.iter().position(|r| r.matches(membership)) {
            Some(index) => {
                records.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn is_member(&self, membership: Membership) -> Result<bool, DomainError> {
        let records = self.records.read().await;
        Ok(records.iter().any(|r| r.matches(membership)))
    }

    async fn members_of(&self, team_id: TeamId) -> Result<Vec<String>, DomainError> {
        let records = self.records.read().await;

        Ok(records
            .iter()
            .filter(|r| r.team_id == team_id)
            .map(|r| r.username.clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user(id: i64, username: &str) -> User {
        User::new(UserId::new(id).unwrap(), username, "hash", Utc::now())
    }

    fn team(id: i64) -> TeamId {
        TeamId::new(id).unwrap()
    }

    #[tokio::test]
    async fn test_add_is_idempotent() {
        let repo = InMemoryMembershipRepository::new();
        let alice = user(1, "alice");

        assert!(repo.add(&alice, team(1)).await.unwrap());
        assert!(!repo.add(&alice, team(1)).await.unwrap());

        assert_eq!(repo.members_of(team(1)).await.unwrap(), vec!["alice"]);
    }

    #[tokio::test]
    async fn test_members_in_insertion_order() {
        let repo = InMemoryMembershipRepository::new();

        repo.add(&user(3, "carol"), team(1)).await.unwrap();
        repo.add(&user(1, "alice"), team(1)).await.unwrap();
        repo.add(&user(2, "bob"), team(2)).await.unwrap();
        repo.add(&user(2, "bob"), team(1)).await.unwrap();

        assert_eq!(
            repo.members_of(team(1)).await.unwrap(),
            vec!["carol", "alice", "bob"]
        );
        assert_eq!(repo.members_of(team(2)).await.unwrap(), vec!["bob"]);
        assert!(repo.members_of(team(3)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_remove() {
        let repo = InMemoryMembershipRepository::new();
        let alice = user(1, "alice");
        let pair = Membership::new(alice.id(), team(1));

        assert!(!repo.remove(pair).await.unwrap());

        repo.add(&alice, team(1)).await.unwrap();
        assert!(repo.is_member(pair).await.unwrap());

        assert!(repo.remove(pair).await.unwrap());
        assert!(!repo.is_member(pair).await.unwrap());
        assert!(repo.members_of(team(1)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_adds_insert_once() {
        let repo = std::sync::Arc::new(InMemoryMembershipRepository::new());
        let alice = user(1, "alice");

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let repo = repo.clone();
                let alice = alice.clone();
                tokio::spawn(async move { repo.add(&alice, team(1)).await.unwrap() })
            })
            .collect();

        let mut inserted = 0;
        for handle in handles {
            if handle.await.unwrap() {
                inserted += 1;
            }
        }

        assert_eq!(inserted, 1);
        assert_eq!(repo.members_of(team(1)).await.unwrap().len(), 1);
    }
}
