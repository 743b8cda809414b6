//! Storage factory for runtime backend selection

use std::sync::Arc;

use tracing::info;

use crate::domain::membership::MembershipRepository;
use crate::domain::team::TeamRepository;
use crate::domain::user::UserRepository;
use crate::domain::DomainError;
use crate::infrastructure::membership::{
    InMemoryMembershipRepository, PostgresMembershipRepository,
};
use crate::infrastructure::team::{InMemoryTeamRepository, PostgresTeamRepository};
use crate::infrastructure::user::{InMemoryUserRepository, PostgresUserRepository};

use super::postgres::{connect, ensure_schema, PostgresConfig};

/// Supported storage types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageType {
    /// In-memory storage (for testing/development)
    InMemory,
    /// PostgreSQL storage
    Postgres,
}

impl StorageType {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "memory" | "inmemory" | "in-memory" | "in_memory" => Some(Self::InMemory),
            "postgres" | "postgresql" | "pg" => Some(Self::Postgres),
            _ => None,
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone)]
pub enum StorageConfig {
    InMemory,
    Postgres(PostgresConfig),
}

impl StorageConfig {
    /// Creates an in-memory storage configuration
    pub fn in_memory() -> Self {
        Self::InMemory
    }

    /// Creates a PostgreSQL storage configuration
    pub fn postgres(config: PostgresConfig) -> Self {
        Self::Postgres(config)
    }

    /// Returns the storage type
    pub fn storage_type(&self) -> StorageType {
        match self {
            Self::InMemory => StorageType::InMemory,
            Self::Postgres(_) => StorageType::Postgres,
        }
    }
}

/// The three stores backing the service, sharing one backend
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub teams: Arc<dyn TeamRepository>,
    pub memberships: Arc<dyn MembershipRepository>,
}

impl std::fmt::Debug for Repositories {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repositories").finish_non_exhaustive()
    }
}

/// Factory for creating repositories
#[derive(Debug)]
pub struct StorageFactory;

impl StorageFactory {
    /// Creates the repositories for the configured backend
    pub async fn create(config: &StorageConfig) -> Result<Repositories, DomainError> {
        match config {
            StorageConfig::InMemory => Ok(Self::create_in_memory()),
            StorageConfig::Postgres(pg_config) => Self::create_postgres(pg_config).await,
        }
    }

    /// Creates empty in-memory repositories
    pub fn create_in_memory() -> Repositories {
        info!("Using in-memory storage");

        Repositories {
            users: Arc::new(InMemoryUserRepository::new()),
            teams: Arc::new(InMemoryTeamRepository::new()),
            memberships: Arc::new(InMemoryMembershipRepository::new()),
        }
    }

    /// Connects to PostgreSQL and bootstraps the schema
    pub async fn create_postgres(config: &PostgresConfig) -> Result<Repositories, DomainError> {
        info!(max_connections = config.max_connections, "Using PostgreSQL storage");

        let pool = connect(config).await?;
        ensure_schema(&pool).await?;

        Ok(Repositories {
            users: Arc::new(PostgresUserRepository::new(pool.clone())),
            teams: Arc::new(PostgresTeamRepository::new(pool.clone())),
            memberships: Arc::new(PostgresMembershipRepository::new(pool)),
        })
    }
}
