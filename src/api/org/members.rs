//! Membership endpoints

use axum::extract::State;
use serde::Deserialize;
use tracing::debug;

use crate::api::auth::MessageResponse;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::membership::AddOutcome;
use crate::infrastructure::membership;

#[derive(Debug, Deserialize)]
pub struct MemberRequest {
    pub username: String,
    pub team_id: i64,
}

impl From<MemberRequest> for membership::MemberRequest {
    fn from(request: MemberRequest) -> Self {
        Self {
            username: request.username,
            team_id: request.team_id,
        }
    }
}

/// POST /org/members/add
pub async fn add_member(
    State(state): State<AppState>,
    Json(request): Json<MemberRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    debug!(username = %request.username, team_id = request.team_id, "Add member request");

    let username = request.username.clone();
    let team_id = request.team_id;
    let outcome = state.membership_service.add_member(request.into()).await?;

    let message = match outcome {
        AddOutcome::Added => format!("User {} added to team {}", username, team_id),
        AddOutcome::AlreadyMember => {
            format!("User {} is already a member of team {}", username, team_id)
        }
    };

    Ok(Json(MessageResponse { message }))
}

/// POST /org/members/remove
pub async fn remove_member(
    State(state): State<AppState>,
    Json(request): Json<MemberRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    debug!(username = %request.username, team_id = request.team_id, "Remove member request");

    let username = request.username.clone();
    let team_id = request.team_id;
    state.membership_service.remove_member(request.into()).await?;

    Ok(Json(MessageResponse {
        message: format!("User {} removed from team {}", username, team_id),
    }))
}
