use std::collections::{HashMap, HashSet};

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::{bet_repo, match_repo, page_offset, result_repo};
use crate::errors::AppError;
use crate::models::{Bet, Match};
use crate::services::betting::{self, BetTicket};
use crate::AppState;

use super::ApiResponse;

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
pub struct BetRequest {
    pub user_id: Uuid,
    pub choice_team_id: Uuid,
    pub amount: Decimal,
}

impl BetRequest {
    fn ticket(&self) -> BetTicket {
        BetTicket {
            choice_team_id: self.choice_team_id,
            amount: self.amount,
        }
    }
}

#[derive(Deserialize)]
pub struct UserQuery {
    pub user_id: Uuid,
    pub page: Option<i64>,
}

#[derive(Serialize)]
pub struct BetView {
    #[serde(flatten)]
    pub bet: Bet,
    pub can_modify: bool,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/matches/{id}/bets: place (or replace) the user's bet
pub async fn create(
    State(state): State<AppState>,
    Path(match_id): Path<Uuid>,
    Json(body): Json<BetRequest>,
) -> Result<Json<ApiResponse<Bet>>, AppError> {
    let bet = betting::place_bet(
        &state.db,
        state.config.bet_window(),
        body.user_id,
        match_id,
        &body.ticket(),
        Utc::now(),
    )
    .await?;

    Ok(Json(ApiResponse::ok(bet)))
}

/// PUT /api/bets/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(bet_id): Path<Uuid>,
    Json(body): Json<BetRequest>,
) -> Result<Json<ApiResponse<Bet>>, AppError> {
    let bet = betting::update_bet(
        &state.db,
        state.config.bet_window(),
        body.user_id,
        bet_id,
        &body.ticket(),
        Utc::now(),
    )
    .await?;

    Ok(Json(ApiResponse::ok(bet)))
}

/// DELETE /api/bets/{id}?user_id=
pub async fn remove(
    State(state): State<AppState>,
    Path(bet_id): Path<Uuid>,
    Query(query): Query<UserQuery>,
) -> Result<StatusCode, AppError> {
    betting::cancel_bet(
        &state.db,
        state.config.bet_window(),
        query.user_id,
        bet_id,
        Utc::now(),
    )
    .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/bets?user_id=: the user's bets, newest first, with `can_modify`
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Result<Json<ApiResponse<Vec<BetView>>>, AppError> {
    let page_size = state.config.page_size;
    let bets = bet_repo::get_user_bets(
        &state.db,
        query.user_id,
        page_size,
        page_offset(query.page, page_size),
    )
    .await?;

    let match_ids: Vec<Uuid> = bets
        .iter()
        .map(|b| b.match_id)
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    let matches: HashMap<Uuid, Match> = match_repo::get_matches_by_ids(&state.db, &match_ids)
        .await?
        .into_iter()
        .map(|m| (m.id, m))
        .collect();
    let settled: HashSet<Uuid> = result_repo::get_results_for_matches(&state.db, &match_ids)
        .await?
        .into_iter()
        .map(|r| r.match_id)
        .collect();

    let window = state.config.bet_window();
    let now = Utc::now();
    let views = bets
        .into_iter()
        .map(|bet| {
            let can_modify = matches
                .get(&bet.match_id)
                .is_some_and(|m| window.is_open(m.start_time, settled.contains(&m.id), now));
            BetView { bet, can_modify }
        })
        .collect();

    Ok(Json(ApiResponse::ok(views)))
}

/// GET /api/bets/results?user_id=: settled bets only
pub async fn results(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Result<Json<ApiResponse<Vec<Bet>>>, AppError> {
    let page_size = state.config.page_size;
    let bets = bet_repo::get_user_settled_bets(
        &state.db,
        query.user_id,
        page_size,
        page_offset(query.page, page_size),
    )
    .await?;

    Ok(Json(ApiResponse::ok(bets)))
}
