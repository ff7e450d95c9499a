use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{match_repo, team_repo, tournament_repo};
use crate::errors::{AppError, BettingError};
use crate::models::{is_valid_spread, Match, Team, Tournament};

pub async fn create_tournament(
    pool: &PgPool,
    name: &str,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Result<Tournament, AppError> {
    if start_date > end_date {
        tracing::warn!(name, %start_date, %end_date, "Tournament rejected: start after end");
        return Err(BettingError::TournamentStartAfterEnd.into());
    }

    let tournament = tournament_repo::create_tournament(pool, name, start_date, end_date).await?;
    tracing::info!(tournament_id = %tournament.id, name, "Tournament created");
    Ok(tournament)
}

/// Create a team; `founded_at` defaults to the current year.
pub async fn create_team(
    pool: &PgPool,
    name: &str,
    founded_at: Option<i32>,
    tournament_ids: &[Uuid],
) -> Result<Team, AppError> {
    for id in tournament_ids {
        tournament_repo::get_tournament(pool, *id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("tournament {id} not found")))?;
    }

    let founded_at = founded_at.unwrap_or_else(|| Utc::now().year());
    let team = team_repo::create_team(pool, name, founded_at, tournament_ids).await?;
    tracing::info!(team_id = %team.id, name, tournaments = tournament_ids.len(), "Team created");
    Ok(team)
}

#[derive(Debug, Clone)]
pub struct NewMatch {
    pub tournament_id: Uuid,
    pub home_team_id: Uuid,
    pub guest_team_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub spread: Decimal,
}

pub async fn create_match(pool: &PgPool, new: &NewMatch) -> Result<Match, AppError> {
    let tournament = tournament_repo::get_tournament(pool, new.tournament_id)
        .await?
        .ok_or_else(|| AppError::NotFound("tournament not found".into()))?;

    check_match_schedule(&tournament, new)?;

    for team_id in [new.home_team_id, new.guest_team_id] {
        team_repo::get_team(pool, team_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("team {team_id} not found")))?;

        if !team_repo::is_registered(pool, team_id, tournament.id).await? {
            tracing::warn!(team_id = %team_id, tournament_id = %tournament.id, "Match rejected: team not in tournament");
            return Err(BettingError::MatchTeamNotInTournament.into());
        }
    }

    let game = match_repo::create_match(
        pool,
        new.tournament_id,
        new.home_team_id,
        new.guest_team_id,
        new.start_time,
        new.spread,
    )
    .await?;

    tracing::info!(match_id = %game.id, tournament_id = %tournament.id, "Match created");
    Ok(game)
}

/// Checks on a new match that only need the tournament row.
pub fn check_match_schedule(tournament: &Tournament, new: &NewMatch) -> Result<(), BettingError> {
    if new.start_time < tournament.opens_at() {
        return Err(BettingError::MatchStartBeforeTournament);
    }
    if new.start_time >= tournament.closes_at() {
        return Err(BettingError::MatchStartAfterTournament);
    }
    if new.home_team_id == new.guest_team_id {
        return Err(BettingError::MatchSingleTeam);
    }
    if !is_valid_spread(new.spread) {
        return Err(BettingError::InvalidSpread);
    }
    Ok(())
}
