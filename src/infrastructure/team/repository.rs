//! In-memory team repository implementation

use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::domain::team::{NewTeam, Team, TeamId, TeamRepository};
use crate::domain::DomainError;

#[derive(Debug, Default)]
struct TeamTable {
    /// Keyed by id, so iteration follows insertion order
    teams: BTreeMap<TeamId, Team>,
    last_id: i64,
}

/// In-memory implementation of TeamRepository
#[derive(Debug, Default)]
pub struct InMemoryTeamRepository {
    table: RwLock<TeamTable>,
}

impl InMemoryTeamRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TeamRepository for InMemoryTeamRepository {
    async fn get(&self, id: TeamId) -> Result<Option<Team>, DomainError> {
        let table = self.table.read().await;
        Ok(table.teams.get(&id).cloned())
    }

    async fn create(&self, team: NewTeam) -> Result<Team, DomainError> {
        let mut table = self.table.write().await;

        if let Some(parent_id) = team.parent_id() {
            if !table.teams.contains_key(&parent_id) {
                return Err(DomainError::ParentNotFound {
                    parent_id: parent_id.value(),
                });
            }
        }

        let id = TeamId::new(table.last_id + 1)
            .map_err(|e| DomainError::internal(e.to_string()))?;
        let team = Team::from_new(id, team);

        table.last_id = id.value();
        table.teams.insert(id, team.clone());

        Ok(team)
    }

    async fn list_roots(&self) -> Result<Vec<Team>, DomainError> {
        let table = self.table.read().await;
        Ok(table.teams.values().filter(|t| t.is_root()).cloned().collect())
    }

    async fn children_of(&self, id: TeamId) -> Result<Vec<Team>, DomainError> {
        let table = self.table.read().await;

        Ok(table
            .teams
            .values()
            .filter(|t| t.parent_id() == Some(id))
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<usize, DomainError> {
        Ok(self.table.read().await.teams.len())
    }
}
