//! Application state for shared services

use std::sync::Arc;

use crate::infrastructure::auth::{JwtConfig, JwtService};
use crate::infrastructure::membership::MembershipService;
use crate::infrastructure::storage::{Repositories, StorageFactory};
use crate::infrastructure::team::TeamService;
use crate::infrastructure::user::{Argon2Hasher, UserService};

/// Application state shared by all handlers
#[derive(Debug, Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub team_service: Arc<TeamService>,
    pub membership_service: Arc<MembershipService>,
}

impl AppState {
    /// Wire the services over a set of repositories
    pub fn new(repositories: Repositories, jwt_config: JwtConfig) -> Self {
        let Repositories {
            users,
            teams,
            memberships,
        } = repositories;

        let user_service = UserService::new(
            users.clone(),
            Arc::new(Argon2Hasher::new()),
            Arc::new(JwtService::new(jwt_config)),
        );
        let team_service = TeamService::new(teams.clone(), memberships.clone());
        let membership_service = MembershipService::new(users, teams, memberships);

        Self {
            user_service: Arc::new(user_service),
            team_service: Arc::new(team_service),
            membership_service: Arc::new(membership_service),
        }
    }

    /// State backed by empty in-memory stores
    pub fn in_memory(jwt_config: JwtConfig) -> Self {
        Self::new(StorageFactory::create_in_memory(), jwt_config)
    }
}
