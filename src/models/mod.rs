pub mod bet;
pub mod matches;
pub mod team;
pub mod tournament;
pub mod user;

pub use bet::Bet;
pub use matches::{Match, MatchResult};
pub use team::Team;
pub use tournament::Tournament;
pub use user::User;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Side
// ---------------------------------------------------------------------------

/// Which of the two teams in a match a bet backs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Home,
    Guest,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Home => write!(f, "home"),
            Side::Guest => write!(f, "guest"),
        }
    }
}

// ---------------------------------------------------------------------------
// Stakes and spreads
// ---------------------------------------------------------------------------

/// Stakes a bettor may choose from: 10000, 20000, ... 50000.
pub fn allowed_stakes() -> impl Iterator<Item = Decimal> {
    (1..=5).map(|i| Decimal::from(i * 10_000))
}

pub fn is_allowed_stake(amount: Decimal) -> bool {
    allowed_stakes().any(|stake| stake == amount)
}

pub const MAX_SPREAD: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

/// A spread is valid when it is a multiple of 0.25 within [-5, 5].
pub fn is_valid_spread(spread: Decimal) -> bool {
    spread.abs() <= MAX_SPREAD && (spread * Decimal::from(4)).fract().is_zero()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_stakes() {
        let stakes: Vec<Decimal> = allowed_stakes().collect();
        assert_eq!(stakes.len(), 5);
        assert_eq!(stakes[0], Decimal::from(10_000));
        assert_eq!(stakes[4], Decimal::from(50_000));

        assert!(is_allowed_stake(Decimal::new(3_000_000, 2))); // 30000.00
        assert!(!is_allowed_stake(Decimal::from(15_000)));
        assert!(!is_allowed_stake(Decimal::ZERO));
        assert!(!is_allowed_stake(Decimal::from(-10_000)));
    }

    #[test]
    fn test_spread_validation() {
        assert!(is_valid_spread(Decimal::ZERO));
        assert!(is_valid_spread(Decimal::new(25, 2)));
        assert!(is_valid_spread(Decimal::new(-175, 2)));
        assert!(is_valid_spread(Decimal::from(5)));
        assert!(is_valid_spread(Decimal::from(-5)));

        assert!(!is_valid_spread(Decimal::new(10, 2)));
        assert!(!is_valid_spread(Decimal::new(525, 2)));
        assert!(!is_valid_spread(Decimal::new(-6, 0)));
    }
}
