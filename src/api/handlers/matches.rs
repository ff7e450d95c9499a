use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::display::{format_result, format_spread};
use crate::db::{match_repo, page_offset, result_repo, tournament_repo};
use crate::errors::AppError;
use crate::models::{Match, MatchResult};
use crate::services::catalog::{self, NewMatch};
use crate::services::settlement::{self, SettlementSummary};
use crate::settlement::{match_profitability, BetWindow, RatioBucket};
use crate::AppState;

use super::ApiResponse;

const MATCH_PAGE_SIZE: i64 = 20;

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
pub struct MatchQuery {
    pub start_time: Option<DateTime<Utc>>,
    pub page: Option<i64>,
}

#[derive(Deserialize)]
pub struct CreateMatchRequest {
    pub tournament_id: Uuid,
    pub home_team_id: Uuid,
    pub guest_team_id: Uuid,
    pub start_time: DateTime<Utc>,
    #[serde(default)]
    pub spread: Decimal,
}

#[derive(Deserialize)]
pub struct UpdateSpreadRequest {
    pub spread: Decimal,
}

/// A match as shown to bettors: row, result, and whether bets are open.
#[derive(Serialize)]
pub struct MatchView {
    #[serde(flatten)]
    pub game: Match,
    pub result: Option<MatchResult>,
    pub can_bet: bool,
    pub spread_display: String,
    pub result_display: String,
}

impl MatchView {
    pub fn new(game: Match, result: Option<MatchResult>, window: BetWindow, now: DateTime<Utc>) -> Self {
        Self {
            can_bet: window.is_open(game.start_time, result.is_some(), now),
            spread_display: format_spread(game.spread),
            result_display: format_result(result.as_ref()),
            game,
            result,
        }
    }
}

#[derive(Serialize)]
pub struct SpreadUpdate {
    #[serde(rename = "match")]
    pub game: Match,
    pub settlement: Option<SettlementSummary>,
}

#[derive(Serialize)]
pub struct Profitability {
    pub match_id: Uuid,
    pub spread: Decimal,
    pub ratio: Decimal,
    pub bucket: RatioBucket,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/tournaments/{id}/matches: kick-off order, with `can_bet`
pub async fn list_for_tournament(
    State(state): State<AppState>,
    Path(tournament_id): Path<Uuid>,
    Query(query): Query<MatchQuery>,
) -> Result<Json<ApiResponse<Vec<MatchView>>>, AppError> {
    tournament_repo::get_tournament(&state.db, tournament_id)
        .await?
        .ok_or_else(|| AppError::NotFound("tournament not found".into()))?;

    let matches = match_repo::list_tournament_matches(
        &state.db,
        tournament_id,
        query.start_time,
        MATCH_PAGE_SIZE,
        page_offset(query.page, MATCH_PAGE_SIZE),
    )
    .await?;

    let ids: Vec<Uuid> = matches.iter().map(|m| m.id).collect();
    let mut results: HashMap<Uuid, MatchResult> = result_repo::get_results_for_matches(&state.db, &ids)
        .await?
        .into_iter()
        .map(|r| (r.match_id, r))
        .collect();

    let window = state.config.bet_window();
    let now = Utc::now();
    let views = matches
        .into_iter()
        .map(|m| {
            let result = results.remove(&m.id);
            MatchView::new(m, result, window, now)
        })
        .collect();

    Ok(Json(ApiResponse::ok(views)))
}

/// GET /api/matches/{id}
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MatchView>>, AppError> {
    let game = match_repo::get_match(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("match not found".into()))?;
    let result = result_repo::get_result(&state.db, id).await?;

    Ok(Json(ApiResponse::ok(MatchView::new(
        game,
        result,
        state.config.bet_window(),
        Utc::now(),
    ))))
}

/// GET /api/matches/{id}/profitability: ratio under the current spread
pub async fn profitability(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Profitability>>, AppError> {
    let game = match_repo::get_match(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("match not found".into()))?;
    let result = result_repo::get_result(&state.db, id).await?;

    let ratio = match_profitability(result.as_ref(), game.spread)?;

    Ok(Json(ApiResponse::ok(Profitability {
        match_id: game.id,
        spread: game.spread,
        ratio,
        bucket: RatioBucket::classify(ratio),
    })))
}

/// POST /api/admin/matches
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateMatchRequest>,
) -> Result<Json<ApiResponse<MatchView>>, AppError> {
    let new = NewMatch {
        tournament_id: body.tournament_id,
        home_team_id: body.home_team_id,
        guest_team_id: body.guest_team_id,
        start_time: body.start_time,
        spread: body.spread,
    };
    let game = catalog::create_match(&state.db, &new).await?;

    Ok(Json(ApiResponse::ok(MatchView::new(
        game,
        None,
        state.config.bet_window(),
        Utc::now(),
    ))))
}

/// PUT /api/admin/matches/{id}/spread: re-settles when a result exists
pub async fn update_spread(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateSpreadRequest>,
) -> Result<Json<ApiResponse<SpreadUpdate>>, AppError> {
    let (game, settlement) = settlement::update_spread(&state.db, id, body.spread).await?;
    Ok(Json(ApiResponse::ok(SpreadUpdate { game, settlement })))
}
