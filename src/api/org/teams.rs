//! Team endpoints

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::team::forest_to_json;
use crate::domain::DomainError;
use crate::infrastructure::team;

#[derive(Debug, Deserialize)]
pub struct CreateTeamRequest {
    pub name: String,
    #[serde(default)]
    pub parent_id: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct TeamCreatedResponse {
    pub id: i64,
    pub name: String,
    pub status: &'static str,
}

/// Hierarchy failures are reported as `{"error": "<message>"}`
#[derive(Debug)]
pub struct HierarchyError(pub DomainError);

#[derive(Serialize)]
struct HierarchyErrorBody {
    error: String,
}

impl IntoResponse for HierarchyError {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(HierarchyErrorBody {
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}

/// POST /org/teams/
pub async fn create_team(
    State(state): State<AppState>,
    Json(request): Json<CreateTeamRequest>,
) -> Result<Json<TeamCreatedResponse>, ApiError> {
    debug!(name = %request.name, parent_id = ?request.parent_id, "Create team request");

    let team = state
        .team_service
        .create_team(team::CreateTeamRequest {
            name: request.name,
            parent_id: request.parent_id,
        })
        .await?;

    Ok(Json(TeamCreatedResponse {
        id: team.id().value(),
        name: team.name().to_string(),
        status: "Created",
    }))
}

/// Pre-rendered JSON body
pub struct JsonBytes(Vec<u8>);

impl IntoResponse for JsonBytes {
    fn into_response(self) -> Response {
        ([(header::CONTENT_TYPE, "application/json")], self.0).into_response()
    }
}

fn render_failed(err: serde_json::Error) -> DomainError {
    DomainError::internal(format!("Failed to render team tree: {}", err))
}

/// GET /org/hierarchy/
pub async fn get_hierarchy(State(state): State<AppState>) -> Result<JsonBytes, HierarchyError> {
    let body = state
        .team_service
        .hierarchy()
        .await
        .and_then(|forest| forest_to_json(&forest).map_err(render_failed))
        .map_err(|e| {
            error!(error = %e, "Failed to build hierarchy");
            HierarchyError(e)
        })?;

    Ok(JsonBytes(body))
}

/// GET /org/teams/{team_id}
pub async fn get_team_tree(
    State(state): State<AppState>,
    Path(team_id): Path<i64>,
) -> Result<JsonBytes, ApiError> {
    let tree = state.team_service.subtree(team_id).await?;
    let body = tree.to_json().map_err(render_failed)?;
    Ok(JsonBytes(body))
}
