use std::time::Instant;

use metrics::{counter, histogram};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::db::{bet_repo, match_repo, result_repo, user_repo};
use crate::errors::{AppError, BettingError};
use crate::models::{is_valid_spread, Match, MatchResult};
use crate::settlement::{plan_settlement, profitability_ratio, RatioBucket};

/// What a settlement pass did to a match's bets.
#[derive(Debug, Clone, Serialize)]
pub struct SettlementSummary {
    pub match_id: Uuid,
    pub ratio: Decimal,
    pub bucket: RatioBucket,
    pub settled_bets: usize,
    /// Sum of the balance changes applied in this pass.
    pub balance_delta: Decimal,
}

/// Record the result of a match and settle every bet on it. The result and
/// all bet/balance updates commit together or not at all.
pub async fn record_result(
    pool: &PgPool,
    match_id: Uuid,
    home_goals: i32,
    guest_goals: i32,
) -> Result<(MatchResult, SettlementSummary), AppError> {
    validate_goals(home_goals, guest_goals)?;

    let mut tx = pool.begin().await?;

    let game = match_repo::get_match_for_update(&mut *tx, match_id)
        .await?
        .ok_or_else(|| AppError::NotFound("match not found".into()))?;

    if result_repo::has_result(&mut *tx, match_id).await? {
        return Err(BettingError::ResultAlreadyRecorded.into());
    }

    let result = result_repo::insert_result(&mut *tx, match_id, home_goals, guest_goals).await?;
    let summary = settle_bets(&mut tx, &game, &result).await?;

    tx.commit().await?;

    counter!("results_recorded_total").increment(1);
    tracing::info!(
        match_id = %match_id,
        home_goals,
        guest_goals,
        settled_bets = summary.settled_bets,
        "Match result recorded"
    );

    Ok((result, summary))
}

/// Correct the goals of an already recorded result and re-settle.
pub async fn correct_result(
    pool: &PgPool,
    match_id: Uuid,
    home_goals: i32,
    guest_goals: i32,
) -> Result<(MatchResult, SettlementSummary), AppError> {
    validate_goals(home_goals, guest_goals)?;

    let mut tx = pool.begin().await?;

    let game = match_repo::get_match_for_update(&mut *tx, match_id)
        .await?
        .ok_or_else(|| AppError::NotFound("match not found".into()))?;

    let result = result_repo::update_result(&mut *tx, match_id, home_goals, guest_goals)
        .await?
        .ok_or(BettingError::MatchHasNoResult)?;
    let summary = settle_bets(&mut tx, &game, &result).await?;

    tx.commit().await?;

    counter!("resettlements_total").increment(1);
    tracing::info!(
        match_id = %match_id,
        home_goals,
        guest_goals,
        balance_delta = %summary.balance_delta,
        "Match result corrected"
    );

    Ok((result, summary))
}

/// Change a match's spread. When the match already has a result, every bet
/// is re-settled in the same transaction.
pub async fn update_spread(
    pool: &PgPool,
    match_id: Uuid,
    spread: Decimal,
) -> Result<(Match, Option<SettlementSummary>), AppError> {
    if !is_valid_spread(spread) {
        return Err(BettingError::InvalidSpread.into());
    }

    let mut tx = pool.begin().await?;

    match_repo::get_match_for_update(&mut *tx, match_id)
        .await?
        .ok_or_else(|| AppError::NotFound("match not found".into()))?;

    let game = match_repo::update_spread(&mut *tx, match_id, spread).await?;

    let summary = match result_repo::get_result(&mut *tx, match_id).await? {
        Some(result) => Some(settle_bets(&mut tx, &game, &result).await?),
        None => None,
    };

    tx.commit().await?;

    if summary.is_some() {
        counter!("resettlements_total").increment(1);
    }
    tracing::info!(
        match_id = %match_id,
        %spread,
        resettled = summary.is_some(),
        "Match spread updated"
    );

    Ok((game, summary))
}

/// Re-run settlement for a match under its current spread and result.
/// Idempotent: with unchanged inputs no balance moves.
pub async fn resettle_match(pool: &PgPool, match_id: Uuid) -> Result<SettlementSummary, AppError> {
    let mut tx = pool.begin().await?;

    let game = match_repo::get_match_for_update(&mut *tx, match_id)
        .await?
        .ok_or_else(|| AppError::NotFound("match not found".into()))?;

    let result = result_repo::get_result(&mut *tx, match_id)
        .await?
        .ok_or(BettingError::MatchHasNoResult)?;
    let summary = settle_bets(&mut tx, &game, &result).await?;

    tx.commit().await?;

    counter!("resettlements_total").increment(1);
    Ok(summary)
}

/// Settle every bet on `game` inside the caller's transaction. Each bet's
/// stored payoff is replaced and its owner's balance moves by the
/// difference from the previously applied payoff.
async fn settle_bets(
    conn: &mut PgConnection,
    game: &Match,
    result: &MatchResult,
) -> Result<SettlementSummary, AppError> {
    let started = Instant::now();

    let ratio = profitability_ratio(result.home_goals, result.guest_goals, game.spread);
    let bucket = RatioBucket::classify(ratio);
    tracing::debug!(match_id = %game.id, %ratio, ?bucket, "Settling bets");

    let bets = bet_repo::get_bets_for_match_for_update(&mut *conn, game.id).await?;
    let plan = plan_settlement(game, result, &bets)?;

    let mut balance_delta = Decimal::ZERO;
    for entry in &plan {
        bet_repo::set_result(&mut *conn, entry.bet_id, entry.payoff).await?;

        if !entry.balance_delta.is_zero() {
            let balance = user_repo::adjust_balance(&mut *conn, entry.user_id, entry.balance_delta).await?;
            tracing::info!(
                bet_id = %entry.bet_id,
                user_id = %entry.user_id,
                payoff = %entry.payoff,
                delta = %entry.balance_delta,
                balance = %balance,
                "Bet settled"
            );
        } else {
            tracing::debug!(bet_id = %entry.bet_id, payoff = %entry.payoff, "Bet settled, balance unchanged");
        }

        balance_delta += entry.balance_delta;
    }

    counter!("bets_settled_total").increment(plan.len() as u64);
    histogram!("settlement_latency_seconds").record(started.elapsed().as_secs_f64());

    Ok(SettlementSummary {
        match_id: game.id,
        ratio,
        bucket,
        settled_bets: plan.len(),
        balance_delta,
    })
}

fn validate_goals(home_goals: i32, guest_goals: i32) -> Result<(), BettingError> {
    if home_goals < 0 || guest_goals < 0 {
        return Err(BettingError::InvalidGoals);
    }
    Ok(())
}
