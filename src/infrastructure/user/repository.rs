//! In-memory user repository implementation

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;

use crate::domain::user::{NewUser, User, UserId, UserRepository};
use crate::domain::DomainError;

#[derive(Debug, Default)]
struct UserTable {
    users: BTreeMap<UserId, User>,
    /// Index for username -> user ID lookup
    username_index: HashMap<String, UserId>,
    last_id: i64,
}

/// In-memory implementation of UserRepository
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    table: RwLock<UserTable>,
}

impl InMemoryUserRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn get(&self, id: UserId) -> Result<Option<User>, DomainError> {
        let table = self.table.read().await;
        Ok(table.users.get(&id).cloned())
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let table = self.table.read().await;

        Ok(table
            .username_index
            .get(username)
            .and_then(|id| table.users.get(id))
            .cloned())
    }

    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        let mut table = self.table.write().await;

        if table.username_index.contains_key(&user.username) {
            return Err(DomainError::duplicate_username(user.username));
        }

        let id = UserId::new(table.last_id + 1)
            .map_err(|e| DomainError::internal(e.to_string()))?;
        let user = User::from_new(id, user);

        table.last_id = id.value();
        table.username_index.insert(user.username().to_string(), id);
        table.users.insert(id, user.clone());

        Ok(user)
    }

    async fn count(&self) -> Result<usize, DomainError> {
        Ok(self.table.read().await.users.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let repo = InMemoryUserRepository::new();

        let alice = repo.create(NewUser::new("alice", "h1")).await.unwrap();
        let bob = repo.create(NewUser::new("bob", "h2")).await.unwrap();

        assert_eq!(alice.id().value(), 1);
        assert_eq!(bob.id().value(), 2);
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_get_and_get_by_username() {
        let repo = InMemoryUserRepository::new();
        let created = repo.create(NewUser::new("alice", "hash")).await.unwrap();

        let by_id = repo.get(created.id()).await.unwrap().unwrap();
        assert_eq!(by_id.username(), "alice");

        let by_name = repo.get_by_username("alice").await.unwrap().unwrap();
        assert_eq!(by_name.id(), created.id());

        assert!(repo.get_by_username("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let repo = InMemoryUserRepository::new();
        repo.create(NewUser::new("alice", "h1")).await.unwrap();

        let result = repo.create(NewUser::new("alice", "h2")).await;
        assert!(matches!(
            result,
            Err(DomainError::DuplicateUsername { ref username }) if username == "alice"
        ));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_usernames_are_case_sensitive() {
        let repo = InMemoryUserRepository::new();
        repo.create(NewUser::new("alice", "h1")).await.unwrap();
        repo.create(NewUser::new("Alice", "h2")).await.unwrap();

        assert!(repo.username_exists("alice").await.unwrap());
        assert!(repo.username_exists("Alice").await.unwrap());
        assert!(!repo.username_exists("ALICE").await.unwrap());
    }
}
