//! Team domain module
//!
//! Teams form a forest: each team has at most one parent and any number of
//! children. Membership of users in teams lives in `domain::membership`.

mod entity;
mod repository;
mod tree;
mod validation;

pub use entity::{NewTeam, Team, TeamId};
pub use repository::TeamRepository;
pub use tree::{forest_to_json, TreeBuilder, TreeNode};
pub use validation::{validate_team_id, validate_team_name, TeamValidationError};

#[cfg(test)]
pub use repository::MockTeamRepository;
