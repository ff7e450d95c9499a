use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::errors::BettingError;
use crate::models::{Bet, Match, MatchResult};

use super::odds::profitability_ratio;
use super::payoff::settle;

/// Outcome of settling one bet: the payoff to store on the bet and the
/// change to apply to its owner's balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BetSettlement {
    pub bet_id: Uuid,
    pub user_id: Uuid,
    pub payoff: Decimal,
    pub balance_delta: Decimal,
}

/// Compute settlements for every bet on a match under its current spread
/// and result.
///
/// The balance delta is the new payoff minus whatever payoff was applied
/// before, so running this again with unchanged inputs yields all-zero
/// deltas and a changed spread or result moves balances by exactly the
/// difference.
pub fn plan_settlement(
    game: &Match,
    result: &MatchResult,
    bets: &[Bet],
) -> Result<Vec<BetSettlement>, BettingError> {
    let ratio = profitability_ratio(result.home_goals, result.guest_goals, game.spread);

    bets.iter()
        .map(|bet| {
            let side = game
                .side_of(bet.choice_team_id)
                .ok_or(BettingError::InvalidBetChoice)?;
            let payoff = settle(side, bet.amount, ratio);
            let previous = bet.result.unwrap_or(Decimal::ZERO);

            Ok(BetSettlement {
                bet_id: bet.id,
                user_id: bet.user_id,
                payoff,
                balance_delta: payoff - previous,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn game(spread: Decimal) -> Match {
        Match {
            id: Uuid::new_v4(),
            tournament_id: Uuid::new_v4(),
            home_team_id: Uuid::new_v4(),
            guest_team_id: Uuid::new_v4(),
            start_time: Utc::now(),
            spread,
            created_at: None,
            updated_at: None,
        }
    }

    fn result(game: &Match, home_goals: i32, guest_goals: i32) -> MatchResult {
        MatchResult {
            match_id: game.id,
            home_goals,
            guest_goals,
            created_at: None,
            updated_at: None,
        }
    }

    fn bet(game: &Match, team: Uuid, amount: i64, previous: Option<Decimal>) -> Bet {
        Bet {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            match_id: game.id,
            choice_team_id: team,
            amount: Decimal::from(amount),
            result: previous,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_first_settlement_applies_full_payoff() {
        let m = game(Decimal::ZERO);
        let r = result(&m, 2, 1);
        let bets = vec![
            bet(&m, m.home_team_id, 10_000, None),
            bet(&m, m.guest_team_id, 10_000, None),
        ];

        let plan = plan_settlement(&m, &r, &bets).unwrap();
        assert_eq!(plan[0].payoff, Decimal::from(10_000));
        assert_eq!(plan[0].balance_delta, Decimal::from(10_000));
        assert_eq!(plan[1].payoff, Decimal::from(-10_000));
        assert_eq!(plan[1].balance_delta, Decimal::from(-10_000));
        assert_eq!(plan[0].user_id, bets[0].user_id);
    }

    #[test]
    fn test_resettle_with_same_inputs_is_noop() {
        let m = game(Decimal::new(25, 2));
        let r = result(&m, 1, 1);
        let bets = vec![bet(&m, m.home_team_id, 10_000, Some(Decimal::from(-5_000)))];

        let plan = plan_settlement(&m, &r, &bets).unwrap();
        assert_eq!(plan[0].payoff, Decimal::from(-5_000));
        assert!(plan[0].balance_delta.is_zero());
    }

    #[test]
    fn test_resettle_after_spread_change_applies_difference() {
        // Previously settled at spread 0 (ratio 1, +10000); spread moves to
        // 0.75 -> ratio 0.25 -> +5000, so the balance drops by 5000.
        let m = game(Decimal::new(75, 2));
        let r = result(&m, 2, 1);
        let bets = vec![bet(&m, m.home_team_id, 10_000, Some(Decimal::from(10_000)))];

        let plan = plan_settlement(&m, &r, &bets).unwrap();
        assert_eq!(plan[0].payoff, Decimal::from(5_000));
        assert_eq!(plan[0].balance_delta, Decimal::from(-5_000));
    }

    #[test]
    fn test_unknown_choice_is_rejected() {
        let m = game(Decimal::ZERO);
        let r = result(&m, 0, 0);
        let bets = vec![bet(&m, Uuid::new_v4(), 10_000, None)];

        assert_eq!(
            plan_settlement(&m, &r, &bets).unwrap_err(),
            BettingError::InvalidBetChoice
        );
    }

    #[test]
    fn test_plan_is_zero_sum_for_opposite_bets() {
        for quarters in -20..=20 {
            let m = game(Decimal::new(quarters * 25, 2));
            let r = result(&m, 1, 2);
            let bets = vec![
                bet(&m, m.home_team_id, 40_000, None),
                bet(&m, m.guest_team_id, 40_000, None),
            ];
            let plan = plan_settlement(&m, &r, &bets).unwrap();
            let total: Decimal = plan.iter().map(|s| s.balance_delta).sum();
            assert!(total.is_zero());
        }
    }
}
