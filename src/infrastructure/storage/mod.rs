//! Storage infrastructure - backend selection and PostgreSQL plumbing

mod factory;
mod postgres;

pub use factory::{Repositories, StorageConfig, StorageFactory, StorageType};
pub use postgres::{
    connect, ensure_schema, is_foreign_key_violation, is_unique_violation, PostgresConfig,
};
