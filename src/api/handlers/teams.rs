use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::db::team_repo;
use crate::errors::AppError;
use crate::models::Team;
use crate::services::catalog;
use crate::AppState;

use super::ApiResponse;

#[derive(Deserialize)]
pub struct CreateTeamRequest {
    pub name: String,
    pub founded_at: Option<i32>,
    #[serde(default)]
    pub tournament_ids: Vec<Uuid>,
}

/// GET /api/teams
pub async fn list(State(state): State<AppState>) -> Result<Json<ApiResponse<Vec<Team>>>, AppError> {
    let teams = team_repo::list_teams(&state.db).await?;
    Ok(Json(ApiResponse::ok(teams)))
}

/// POST /api/admin/teams: create a team registered in the given tournaments
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateTeamRequest>,
) -> Result<Json<ApiResponse<Team>>, AppError> {
    let team = catalog::create_team(&state.db, &body.name, body.founded_at, &body.tournament_ids).await?;
    Ok(Json(ApiResponse::ok(team)))
}
