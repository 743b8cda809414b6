//! Organization API endpoints: teams, hierarchy and membership

mod members;
mod teams;

use axum::{
    routing::{get, post},
    Router,
};

use crate::api::state::AppState;

pub use members::MemberRequest;
pub use teams::{CreateTeamRequest, HierarchyError, TeamCreatedResponse};

/// Create the organization router
pub fn create_org_router() -> Router<AppState> {
    Router::new()
        .route("/teams/", post(teams::create_team))
        .route("/teams/{team_id}", get(teams::get_team_tree))
        .route("/hierarchy/", get(teams::get_hierarchy))
        .route("/members/add", post(members::add_member))
        .route("/members/remove", post(members::remove_member))
}
