mod common;

use chrono::Utc;
use rust_decimal::Decimal;

use bettings::db::{bet_repo, result_repo};
use bettings::errors::{AppError, BettingError};
use bettings::models::{Bet, Match};
use bettings::services::betting::{place_bet, BetTicket};
use bettings::services::settlement::{correct_result, record_result, resettle_match, update_spread};
use bettings::settlement::{BetWindow, RatioBucket};

async fn bet_on(pool: &sqlx::PgPool, game: &Match, team_id: uuid::Uuid, amount: i64) -> Bet {
    let user = common::seed_user(pool).await;
    let ticket = BetTicket {
        choice_team_id: team_id,
        amount: Decimal::from(amount),
    };
    place_bet(pool, BetWindow::default(), user.id, game.id, &ticket, Utc::now())
        .await
        .expect("Bet should be accepted")
}

async fn stored_result(pool: &sqlx::PgPool, bet: &Bet) -> Option<Decimal> {
    bet_repo::get_bet(pool, bet.id)
        .await
        .expect("DB query should succeed")
        .expect("Bet should exist")
        .result
}

#[tokio::test]
async fn test_result_settles_home_and_guest_bets() {
    let pool = common::setup_test_db().await;
    let game = common::seed_open_match(&pool, Decimal::ZERO).await;

    let home_bet = bet_on(&pool, &game, game.home_team_id, 10_000).await;
    let guest_bet = bet_on(&pool, &game, game.guest_team_id, 10_000).await;
    assert_eq!(stored_result(&pool, &home_bet).await, None);

    let (_, summary) = record_result(&pool, game.id, 2, 1)
        .await
        .expect("Result should be recorded");

    assert_eq!(summary.ratio, Decimal::ONE);
    assert_eq!(summary.bucket, RatioBucket::HomeWin);
    assert_eq!(summary.settled_bets, 2);
    assert!(summary.balance_delta.is_zero());

    assert_eq!(stored_result(&pool, &home_bet).await, Some(Decimal::from(10_000)));
    assert_eq!(stored_result(&pool, &guest_bet).await, Some(Decimal::from(-10_000)));
    assert_eq!(common::balance_of(&pool, home_bet.user_id).await, Decimal::from(10_000));
    assert_eq!(common::balance_of(&pool, guest_bet.user_id).await, Decimal::from(-10_000));
}

#[tokio::test]
async fn test_quarter_spread_halves_payoff() {
    let pool = common::setup_test_db().await;
    let game = common::seed_open_match(&pool, Decimal::new(25, 2)).await;

    let home_bet = bet_on(&pool, &game, game.home_team_id, 10_000).await;
    let guest_bet = bet_on(&pool, &game, game.guest_team_id, 10_000).await;

    let (_, summary) = record_result(&pool, game.id, 1, 1).await.unwrap();
    assert_eq!(summary.ratio, Decimal::new(-25, 2));

    assert_eq!(common::balance_of(&pool, home_bet.user_id).await, Decimal::from(-5_000));
    assert_eq!(common::balance_of(&pool, guest_bet.user_id).await, Decimal::from(5_000));
}

#[tokio::test]
async fn test_push_leaves_balances_untouched() {
    let pool = common::setup_test_db().await;
    let game = common::seed_open_match(&pool, Decimal::ZERO).await;

    let home_bet = bet_on(&pool, &game, game.home_team_id, 50_000).await;
    let guest_bet = bet_on(&pool, &game, game.guest_team_id, 20_000).await;

    record_result(&pool, game.id, 1, 1).await.unwrap();

    assert_eq!(stored_result(&pool, &home_bet).await, Some(Decimal::ZERO));
    assert_eq!(stored_result(&pool, &guest_bet).await, Some(Decimal::ZERO));
    assert!(common::balance_of(&pool, home_bet.user_id).await.is_zero());
    assert!(common::balance_of(&pool, guest_bet.user_id).await.is_zero());
}

#[tokio::test]
async fn test_second_result_is_rejected_without_changes() {
    let pool = common::setup_test_db().await;
    let game = common::seed_open_match(&pool, Decimal::ZERO).await;
    let home_bet = bet_on(&pool, &game, game.home_team_id, 10_000).await;

    record_result(&pool, game.id, 3, 0).await.unwrap();
    let err = record_result(&pool, game.id, 0, 3).await.unwrap_err();

    assert!(matches!(err, AppError::Betting(BettingError::ResultAlreadyRecorded)));
    assert_eq!(common::balance_of(&pool, home_bet.user_id).await, Decimal::from(10_000));
}

#[tokio::test]
async fn test_spread_edit_after_result_replaces_payoff() {
    let pool = common::setup_test_db().await;
    let game = common::seed_open_match(&pool, Decimal::ZERO).await;
    let home_bet = bet_on(&pool, &game, game.home_team_id, 10_000).await;
    let guest_bet = bet_on(&pool, &game, game.guest_team_id, 10_000).await;

    record_result(&pool, game.id, 2, 1).await.unwrap();
    assert_eq!(common::balance_of(&pool, home_bet.user_id).await, Decimal::from(10_000));

    // 2 - (1 + 0.75) = 0.25 -> half win for home
    let (updated, summary) = update_spread(&pool, game.id, Decimal::new(75, 2)).await.unwrap();
    assert_eq!(updated.spread, Decimal::new(75, 2));
    let summary = summary.expect("Match with a result should be re-settled");
    assert_eq!(summary.bucket, RatioBucket::HomeHalfWin);

    assert_eq!(stored_result(&pool, &home_bet).await, Some(Decimal::from(5_000)));
    assert_eq!(common::balance_of(&pool, home_bet.user_id).await, Decimal::from(5_000));
    assert_eq!(common::balance_of(&pool, guest_bet.user_id).await, Decimal::from(-5_000));

    // Same inputs again: nothing moves
    let summary = resettle_match(&pool, game.id).await.unwrap();
    assert!(summary.balance_delta.is_zero());
    assert_eq!(common::balance_of(&pool, home_bet.user_id).await, Decimal::from(5_000));
    assert_eq!(common::balance_of(&pool, guest_bet.user_id).await, Decimal::from(-5_000));
}

#[tokio::test]
async fn test_spread_edit_before_result_does_not_settle() {
    let pool = common::setup_test_db().await;
    let game = common::seed_open_match(&pool, Decimal::ZERO).await;
    let home_bet = bet_on(&pool, &game, game.home_team_id, 10_000).await;

    let (_, summary) = update_spread(&pool, game.id, Decimal::new(-150, 2)).await.unwrap();

    assert!(summary.is_none());
    assert_eq!(stored_result(&pool, &home_bet).await, None);
    assert!(common::balance_of(&pool, home_bet.user_id).await.is_zero());
}

#[tokio::test]
async fn test_invalid_spread_is_rejected() {
    let pool = common::setup_test_db().await;
    let game = common::seed_open_match(&pool, Decimal::ZERO).await;

    let err = update_spread(&pool, game.id, Decimal::new(30, 2)).await.unwrap_err();
    assert!(matches!(err, AppError::Betting(BettingError::InvalidSpread)));
}

#[tokio::test]
async fn test_correcting_result_resettles() {
    let pool = common::setup_test_db().await;
    let game = common::seed_open_match(&pool, Decimal::ZERO).await;
    let home_bet = bet_on(&pool, &game, game.home_team_id, 30_000).await;

    record_result(&pool, game.id, 2, 0).await.unwrap();
    assert_eq!(common::balance_of(&pool, home_bet.user_id).await, Decimal::from(30_000));

    let (result, summary) = correct_result(&pool, game.id, 0, 2).await.unwrap();
    assert_eq!((result.home_goals, result.guest_goals), (0, 2));
    assert_eq!(summary.balance_delta, Decimal::from(-60_000));
    assert_eq!(common::balance_of(&pool, home_bet.user_id).await, Decimal::from(-30_000));
}

#[tokio::test]
async fn test_resettle_without_result_fails() {
    let pool = common::setup_test_db().await;
    let game = common::seed_open_match(&pool, Decimal::ZERO).await;

    let err = resettle_match(&pool, game.id).await.unwrap_err();
    assert!(matches!(err, AppError::Betting(BettingError::MatchHasNoResult)));

    let err = correct_result(&pool, game.id, 1, 0).await.unwrap_err();
    assert!(matches!(err, AppError::Betting(BettingError::MatchHasNoResult)));
}

#[tokio::test]
async fn test_unknown_match_is_not_found() {
    let pool = common::setup_test_db().await;

    let err = record_result(&pool, uuid::Uuid::new_v4(), 1, 0).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_failed_settlement_rolls_back_result() {
    let pool = common::setup_test_db().await;
    let game = common::seed_open_match(&pool, Decimal::ZERO).await;
    let valid_bet = bet_on(&pool, &game, game.home_team_id, 10_000).await;

    // A bet on a team that does not play this match cannot be settled
    let elsewhere = common::seed_tournament(&pool).await;
    let outsider = common::seed_team(&pool, &elsewhere).await;
    let stray_user = common::seed_user(&pool).await;
    let stray_bet = bet_repo::insert_bet(&pool, stray_user.id, game.id, outsider.id, Decimal::from(10_000))
        .await
        .unwrap();

    let err = record_result(&pool, game.id, 2, 0).await.unwrap_err();
    assert!(matches!(err, AppError::Betting(BettingError::InvalidBetChoice)));

    assert!(!result_repo::has_result(&pool, game.id).await.unwrap());
    assert_eq!(stored_result(&pool, &valid_bet).await, None);
    assert_eq!(stored_result(&pool, &stray_bet).await, None);
    assert!(common::balance_of(&pool, valid_bet.user_id).await.is_zero());
    assert!(common::balance_of(&pool, stray_user.id).await.is_zero());
}
