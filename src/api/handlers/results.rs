use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::MatchResult;
use crate::services::settlement::{self, SettlementSummary};
use crate::AppState;

use super::ApiResponse;

#[derive(Deserialize)]
pub struct ResultRequest {
    pub home_goals: i32,
    pub guest_goals: i32,
}

#[derive(Serialize)]
pub struct SettledResult {
    pub result: MatchResult,
    pub settlement: SettlementSummary,
}

/// POST /api/admin/matches/{id}/result: record the score and settle all bets
pub async fn record(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<ResultRequest>,
) -> Result<Json<ApiResponse<SettledResult>>, AppError> {
    let (result, settlement) =
        settlement::record_result(&state.db, id, body.home_goals, body.guest_goals).await?;
    Ok(Json(ApiResponse::ok(SettledResult { result, settlement })))
}

/// PUT /api/admin/matches/{id}/result: correct the score and re-settle
pub async fn correct(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<ResultRequest>,
) -> Result<Json<ApiResponse<SettledResult>>, AppError> {
    let (result, settlement) =
        settlement::correct_result(&state.db, id, body.home_goals, body.guest_goals).await?;
    Ok(Json(ApiResponse::ok(SettledResult { result, settlement })))
}

/// POST /api/admin/matches/{id}/resettle: re-run settlement as-is
pub async fn resettle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<SettlementSummary>>, AppError> {
    let summary = settlement::resettle_match(&state.db, id).await?;
    Ok(Json(ApiResponse::ok(summary)))
}
