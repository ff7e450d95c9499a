use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::{page_offset, tournament_repo};
use crate::errors::AppError;
use crate::models::Tournament;
use crate::services::catalog;
use crate::AppState;

use super::ApiResponse;

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
pub struct TournamentQuery {
    pub name: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub page: Option<i64>,
}

#[derive(Deserialize)]
pub struct CreateTournamentRequest {
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Serialize)]
pub struct TournamentView {
    #[serde(flatten)]
    pub tournament: Tournament,
    pub display_name: String,
}

impl From<Tournament> for TournamentView {
    fn from(tournament: Tournament) -> Self {
        Self {
            display_name: tournament.display_name(),
            tournament,
        }
    }
}

/// Parse a `YYYY-MM-DD` search bound. Unparseable input is logged and the
/// filter dropped rather than failing the search.
fn parse_date_filter(field: &str, raw: Option<&str>) -> Option<NaiveDate> {
    let raw = raw.filter(|s| !s.is_empty())?;
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(_) => {
            tracing::warn!(field, value = raw, "Cannot parse date filter, ignoring");
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/tournaments: newest first, filtered by name and date bounds
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<TournamentQuery>,
) -> Result<Json<ApiResponse<Vec<TournamentView>>>, AppError> {
    let filter = tournament_repo::TournamentFilter {
        name: query.name.filter(|n| !n.is_empty()),
        start_date_from: parse_date_filter("start_date", query.start_date.as_deref()),
        end_date_until: parse_date_filter("end_date", query.end_date.as_deref()),
    };
    tracing::debug!(?filter, page = ?query.page, "Listing tournaments");

    let page_size = state.config.page_size;
    let tournaments = tournament_repo::list_tournaments(
        &state.db,
        &filter,
        page_size,
        page_offset(query.page, page_size),
    )
    .await?;

    Ok(Json(ApiResponse::ok(
        tournaments.into_iter().map(TournamentView::from).collect(),
    )))
}

/// GET /api/tournaments/{id}
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<TournamentView>>, AppError> {
    let tournament = tournament_repo::get_tournament(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("tournament not found".into()))?;

    Ok(Json(ApiResponse::ok(tournament.into())))
}

/// POST /api/admin/tournaments
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateTournamentRequest>,
) -> Result<Json<ApiResponse<TournamentView>>, AppError> {
    let tournament =
        catalog::create_tournament(&state.db, &body.name, body.start_date, body.end_date).await?;

    Ok(Json(ApiResponse::ok(tournament.into())))
}
