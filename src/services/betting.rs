use chrono::{DateTime, Utc};
use metrics::counter;
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::db::{bet_repo, match_repo, result_repo, user_repo};
use crate::errors::{AppError, BettingError};
use crate::models::{is_allowed_stake, Bet, Match};
use crate::settlement::BetWindow;

/// Choice and stake submitted by a bettor.
#[derive(Debug, Clone)]
pub struct BetTicket {
    pub choice_team_id: Uuid,
    pub amount: Decimal,
}

/// Place a bet on a match. A user holds at most one bet per match, so a
/// second placement replaces the choice and stake of the existing bet.
///
/// The match row is locked for the whole transaction, so a bet either lands
/// before a result is recorded (and gets settled with it) or is rejected.
pub async fn place_bet(
    pool: &PgPool,
    window: BetWindow,
    user_id: Uuid,
    match_id: Uuid,
    ticket: &BetTicket,
    now: DateTime<Utc>,
) -> Result<Bet, AppError> {
    user_repo::get_user(pool, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("user not found".into()))?;

    let mut tx = pool.begin().await?;

    let game = lock_match(&mut tx, match_id).await?;
    ensure_window(&mut tx, window, &game, user_id, now).await?;
    validate_ticket(&game, ticket)?;

    let (bet, created) = match bet_repo::find_user_bet(&mut *tx, user_id, match_id).await? {
        Some(existing) => {
            let bet = bet_repo::update_bet(&mut *tx, existing.id, ticket.choice_team_id, ticket.amount).await?;
            (bet, false)
        }
        None => {
            let bet = bet_repo::insert_bet(&mut *tx, user_id, match_id, ticket.choice_team_id, ticket.amount).await?;
            (bet, true)
        }
    };

    tx.commit().await?;

    if created {
        counter!("bets_placed_total").increment(1);
    }
    tracing::info!(
        user_id = %user_id,
        bet_id = %bet.id,
        match_id = %match_id,
        choice = %bet.choice_team_id,
        amount = %bet.amount,
        "Bet placed"
    );

    Ok(bet)
}

/// Change the choice and stake of a bet the user owns.
pub async fn update_bet(
    pool: &PgPool,
    window: BetWindow,
    user_id: Uuid,
    bet_id: Uuid,
    ticket: &BetTicket,
    now: DateTime<Utc>,
) -> Result<Bet, AppError> {
    let owned = load_owned_bet(pool, user_id, bet_id).await?;

    let mut tx = pool.begin().await?;

    let game = lock_match(&mut tx, owned.match_id).await?;
    ensure_window(&mut tx, window, &game, user_id, now).await?;
    validate_ticket(&game, ticket)?;

    let bet = bet_repo::update_bet(&mut *tx, owned.id, ticket.choice_team_id, ticket.amount).await?;

    tx.commit().await?;

    tracing::info!(
        user_id = %user_id,
        bet_id = %bet.id,
        match_id = %bet.match_id,
        choice = %bet.choice_team_id,
        amount = %bet.amount,
        "Bet updated"
    );

    Ok(bet)
}

/// Withdraw a bet the user owns.
pub async fn cancel_bet(
    pool: &PgPool,
    window: BetWindow,
    user_id: Uuid,
    bet_id: Uuid,
    now: DateTime<Utc>,
) -> Result<(), AppError> {
    let owned = load_owned_bet(pool, user_id, bet_id).await?;

    let mut tx = pool.begin().await?;

    let game = lock_match(&mut tx, owned.match_id).await?;
    ensure_window(&mut tx, window, &game, user_id, now).await?;

    bet_repo::delete_bet(&mut *tx, owned.id).await?;

    tx.commit().await?;

    counter!("bets_cancelled_total").increment(1);
    tracing::info!(user_id = %user_id, bet_id = %owned.id, "Bet deleted");

    Ok(())
}

/// Stake and choice checks that do not need the database.
pub fn validate_ticket(game: &Match, ticket: &BetTicket) -> Result<(), BettingError> {
    if !is_allowed_stake(ticket.amount) {
        return Err(BettingError::InvalidBetAmount);
    }
    if game.side_of(ticket.choice_team_id).is_none() {
        return Err(BettingError::InvalidBetChoice);
    }
    Ok(())
}

async fn ensure_window(
    conn: &mut PgConnection,
    window: BetWindow,
    game: &Match,
    user_id: Uuid,
    now: DateTime<Utc>,
) -> Result<(), AppError> {
    let has_result = result_repo::has_result(&mut *conn, game.id).await?;

    if let Err(e) = window.ensure_open(game.start_time, has_result, now) {
        counter!("bet_window_rejections_total").increment(1);
        tracing::warn!(
            user_id = %user_id,
            match_id = %game.id,
            start_time = %game.start_time,
            has_result,
            "Bet rejected: window closed"
        );
        return Err(e.into());
    }

    Ok(())
}

/// Lock the match row; settlement takes the same lock.
async fn lock_match(conn: &mut PgConnection, match_id: Uuid) -> Result<Match, AppError> {
    match_repo::get_match_for_update(&mut *conn, match_id)
        .await?
        .ok_or_else(|| AppError::NotFound("match not found".into()))
}

async fn load_owned_bet(pool: &PgPool, user_id: Uuid, bet_id: Uuid) -> Result<Bet, AppError> {
    bet_repo::get_bet(pool, bet_id)
        .await?
        .filter(|bet| bet.user_id == user_id)
        .ok_or_else(|| AppError::NotFound("bet not found".into()))
}
