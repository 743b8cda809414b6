//! Org Hierarchy Service
//!
//! User registration and bearer-token login, a self-referential team tree,
//! and many-to-many team membership served as nested JSON.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use api::state::AppState;
use infrastructure::storage::StorageFactory;
use tracing::info;

/// Create the application state with all services initialized
pub async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let storage_config = config
        .storage
        .to_storage_config()
        .map_err(|e| anyhow::anyhow!(e))?;

    info!("Storage backend: {:?}", storage_config.storage_type());

    let repositories = StorageFactory::create(&storage_config)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to initialize storage: {}", e))?;

    Ok(AppState::new(repositories, config.auth.to_jwt_config()))
}
