use rust_decimal::Decimal;

use crate::models::Side;

use super::odds::RatioBucket;

/// Signed payoff of a bet of `amount` on `choice`, given the match's
/// profitability ratio. Guest bettors take the mirror image of the home
/// payoff, so two opposite bets of equal stake always sum to zero.
pub fn settle(choice: Side, amount: Decimal, ratio: Decimal) -> Decimal {
    match (RatioBucket::classify(ratio), choice) {
        (RatioBucket::Push, _) => Decimal::ZERO,
        (bucket, Side::Home) => amount * bucket.home_multiplier(),
        (bucket, Side::Guest) => -(amount * bucket.home_multiplier()),
    }
}
