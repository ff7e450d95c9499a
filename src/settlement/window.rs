use chrono::{DateTime, Duration, Utc};

use crate::errors::BettingError;

pub const DEFAULT_LEAD_MINUTES: i64 = 30;

/// Time window during which bets on a match may still change: it closes a
/// fixed lead time before kick-off, or as soon as a result exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BetWindow {
    lead: Duration,
}

impl Default for BetWindow {
    fn default() -> Self {
        Self::new(DEFAULT_LEAD_MINUTES)
    }
}

impl BetWindow {
    pub fn new(lead_minutes: i64) -> Self {
        Self {
            lead: Duration::minutes(lead_minutes),
        }
    }

    /// Last instant (exclusive) at which a bet on a match starting at
    /// `start_time` may still change.
    pub fn closes_at(&self, start_time: DateTime<Utc>) -> DateTime<Utc> {
        start_time - self.lead
    }

    pub fn is_open(&self, start_time: DateTime<Utc>, has_result: bool, now: DateTime<Utc>) -> bool {
        !has_result && now < self.closes_at(start_time)
    }

    pub fn ensure_open(
        &self,
        start_time: DateTime<Utc>,
        has_result: bool,
        now: DateTime<Utc>,
    ) -> Result<(), BettingError> {
        if self.is_open(start_time, has_result, now) {
            Ok(())
        } else {
            Err(BettingError::BetExpired)
        }
    }
}
