//! Infrastructure layer - storage backends, services and runtime plumbing

pub mod auth;
pub mod logging;
pub mod membership;
pub mod storage;
pub mod team;
pub mod user;
