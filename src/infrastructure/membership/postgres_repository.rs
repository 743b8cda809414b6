//! PostgreSQL membership repository implementation

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::membership::{Membership, MembershipRepository};
use crate::domain::team::TeamId;
use crate::domain::user::User;
use crate::domain::DomainError;
use crate::infrastructure::storage::is_foreign_key_violation;

/// PostgreSQL implementation of MembershipRepository
#[derive(Debug, Clone)]
pub struct PostgresMembershipRepository {
    pool: PgPool,
}

impl PostgresMembershipRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MembershipRepository for PostgresMembershipRepository {
    async fn add(&self, user: &User, team_id: TeamId) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO team_members (user_id, team_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, team_id) DO NOTHING
            "#,
        )
        .bind(user.id().value())
        .bind(team_id.value())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                DomainError::not_found(format!("Team {} not found", team_id))
            } else {
                DomainError::storage(format!("Failed to add member: {}", e))
            }
        })?;

        Ok(result.rows_affected() > 0)
    }

    async fn remove(&self, membership: Membership) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM team_members WHERE user_id = $1 AND team_id = $2")
            .bind(membership.user_id.value())
            .bind(membership.team_id.value())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to remove member: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn is_member(&self, membership: Membership) -> Result<bool, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM team_members WHERE user_id = $1 AND team_id = $2
            ) AS present
            "#,
        )
        .bind(membership.user_id.value())
        .bind(membership.team_id.value())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to check membership: {}", e)))?;

        row.try_get("present")
            .map_err(|e| DomainError::storage(format!("Failed to read membership: {}", e)))
    }

    async fn members_of(&self, team_id: TeamId) -> Result<Vec<String>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT u.username
            FROM team_members m
            JOIN users u ON u.id = m.user_id
            WHERE m.team_id = $1
            ORDER BY m.seq
            "#,
        )
        .bind(team_id.value())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to list members: {}", e)))?;

        rows.iter()
            .map(|row| {
                row.try_get("username")
                    .map_err(|e| DomainError::storage(format!("Failed to read username: {}", e)))
            })
            .collect()
    }
}
