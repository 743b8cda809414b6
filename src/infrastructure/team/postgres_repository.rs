//! PostgreSQL team repository implementation

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::team::{NewTeam, Team, TeamId, TeamRepository};
use crate::domain::DomainError;

/// PostgreSQL implementation of TeamRepository
#[derive(Debug, Clone)]
pub struct PostgresTeamRepository {
    pool: PgPool,
}

impl PostgresTeamRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TeamRepository for PostgresTeamRepository {
    async fn get(&self, id: TeamId) -> Result<Option<Team>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, parent_id, created_at
            FROM teams
            WHERE id = $1
            "#,
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get team: {}", e)))?;

        row.as_ref().map(row_to_team).transpose()
    }

    async fn create(&self, team: NewTeam) -> Result<Team, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to begin transaction: {}", e)))?;

        // Dropping `tx` on any early return rolls the transaction back.
        if let Some(parent_id) = team.parent_id() {
            let parent: Option<i64> =
                sqlx::query_scalar("SELECT id FROM teams WHERE id = $1 FOR KEY SHARE")
                    .bind(parent_id.value())
                    .fetch_optional(&mut *tx)
                    .await
                    .map_err(|e| DomainError::storage(format!("Failed to look up parent: {}", e)))?;

            if parent.is_none() {
                return Err(DomainError::ParentNotFound {
                    parent_id: parent_id.value(),
                });
            }
        }

        let row = sqlx::query(
            r#"
            INSERT INTO teams (name, parent_id)
            VALUES ($1, $2)
            RETURNING id, name, parent_id, created_at
            "#,
        )
        .bind(team.name())
        .bind(team.parent_id().map(|p| p.value()))
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to create team: {}", e)))?;

        let created = row_to_team(&row)?;

        tx.commit()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to commit team: {}", e)))?;

        Ok(created)
    }

    async fn list_roots(&self) -> Result<Vec<Team>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, parent_id, created_at
            FROM teams
            WHERE parent_id IS NULL
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to list root teams: {}", e)))?;

        rows.iter().map(row_to_team).collect()
    }

    async fn children_of(&self, id: TeamId) -> Result<Vec<Team>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, parent_id, created_at
            FROM teams
            WHERE parent_id = $1
            ORDER BY id
            "#,
        )
        .bind(id.value())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to list child teams: {}", e)))?;

        rows.iter().map(row_to_team).collect()
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM teams")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to count teams: {}", e)))?;

        usize::try_from(count).map_err(|e| DomainError::storage(e.to_string()))
    }
}

fn row_to_team(row: &sqlx::postgres::PgRow) -> Result<Team, DomainError> {
    let id: i64 = row.get("id");
    let name: String = row.get("name");
    let parent_id: Option<i64> = row.get("parent_id");
    let created_at: chrono::DateTime<chrono::Utc> = row.get("created_at");

    let team_id = TeamId::new(id)
        .map_err(|e| DomainError::storage(format!("Invalid team ID in database: {}", e)))?;
    let parent_id = parent_id
        .map(TeamId::new)
        .transpose()
        .map_err(|e| DomainError::storage(format!("Invalid parent ID in database: {}", e)))?;

    Ok(Team::new(team_id, name, parent_id, created_at))
}
