use rust_decimal::Decimal;
use serde::Serialize;

use crate::errors::BettingError;
use crate::models::MatchResult;

const HALF: Decimal = Decimal::from_parts(5, 0, 0, false, 1);
const QUARTER: Decimal = Decimal::from_parts(25, 0, 0, false, 2);

/// Actual home margin minus the margin the spread expects.
///
/// Positive means home beat the spread, negative means it fell short,
/// zero is an exact push.
pub fn profitability_ratio(home_goals: i32, guest_goals: i32, spread: Decimal) -> Decimal {
    Decimal::from(home_goals) - (Decimal::from(guest_goals) + spread)
}

/// Profitability of a match under its current spread. Fails with
/// `MatchHasNoResult` when no result has been recorded yet.
pub fn match_profitability(
    result: Option<&MatchResult>,
    spread: Decimal,
) -> Result<Decimal, BettingError> {
    let result = result.ok_or(BettingError::MatchHasNoResult)?;
    let ratio = profitability_ratio(result.home_goals, result.guest_goals, spread);

    tracing::debug!(
        match_id = %result.match_id,
        home_goals = result.home_goals,
        guest_goals = result.guest_goals,
        %spread,
        %ratio,
        "Profitability ratio computed"
    );

    Ok(ratio)
}

/// Handicap bucket a ratio falls into, seen from the home side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RatioBucket {
    /// ratio >= 0.5
    HomeWin,
    /// ratio == 0.25
    HomeHalfWin,
    /// ratio == 0
    Push,
    /// ratio == -0.25
    HomeHalfLoss,
    /// everything else (ratio <= -0.5 for quarter-point spreads)
    HomeLoss,
}

impl RatioBucket {
    pub fn classify(ratio: Decimal) -> Self {
        match ratio {
            r if r >= HALF => RatioBucket::HomeWin,
            r if r == QUARTER => RatioBucket::HomeHalfWin,
            r if r.is_zero() => RatioBucket::Push,
            r if r == -QUARTER => RatioBucket::HomeHalfLoss,
            _ => RatioBucket::HomeLoss,
        }
    }

    /// Fraction of the stake a home bettor wins (positive) or loses (negative).
    pub fn home_multiplier(self) -> Decimal {
        match self {
            RatioBucket::HomeWin => Decimal::ONE,
            RatioBucket::HomeHalfWin => HALF,
            RatioBucket::Push => Decimal::ZERO,
            RatioBucket::HomeHalfLoss => -HALF,
            RatioBucket::HomeLoss => Decimal::NEGATIVE_ONE,
        }
    }
}
