use serde::Deserialize;

use crate::infrastructure::auth::JwtConfig;
use crate::infrastructure::storage::{PostgresConfig, StorageConfig, StorageType};

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub storage: StorageSettings,
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// `memory` or `postgres`
    pub backend: String,
    pub database_url: Option<String>,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_expiration_minutes: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: "memory".to_string(),
            database_url: None,
            max_connections: 10,
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        let jwt = JwtConfig::default();

        Self {
            jwt_secret: jwt.secret,
            token_expiration_minutes: jwt.expiration_minutes,
        }
    }
}

impl StorageSettings {
    /// Resolve the backend selection into a storage configuration.
    ///
    /// `DATABASE_URL` is used when no URL is configured.
    pub fn to_storage_config(&self) -> Result<StorageConfig, String> {
        match StorageType::from_str(&self.backend) {
            Some(StorageType::InMemory) => Ok(StorageConfig::in_memory()),
            Some(StorageType::Postgres) => {
                let url = self
                    .database_url
                    .clone()
                    .or_else(|| std::env::var("DATABASE_URL").ok())
                    .ok_or_else(|| {
                        "storage.database_url or DATABASE_URL is required for postgres".to_string()
                    })?;

                Ok(StorageConfig::postgres(
                    PostgresConfig::new(url).with_max_connections(self.max_connections),
                ))
            }
            None => Err(format!("Unknown storage backend '{}'", self.backend)),
        }
    }
}

impl AuthConfig {
    pub fn to_jwt_config(&self) -> JwtConfig {
        JwtConfig::new(self.jwt_secret.clone(), self.token_expiration_minutes)
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_with_env(
            config::Environment::with_prefix("APP")
                .separator("__")
                .try_parsing(true),
        )
    }

    fn load_with_env(env: config::Environment) -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(env)
            .build()?;

        config.try_deserialize()
    }
}
