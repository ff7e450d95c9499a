use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::Side;

/// Database row for matches table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Match {
    pub id: Uuid,
    pub tournament_id: Uuid,
    pub home_team_id: Uuid,
    pub guest_team_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub spread: Decimal,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Match {
    /// Map a team to its side in this match, if it plays in it.
    pub fn side_of(&self, team_id: Uuid) -> Option<Side> {
        if team_id == self.home_team_id {
            Some(Side::Home)
        } else if team_id == self.guest_team_id {
            Some(Side::Guest)
        } else {
            None
        }
    }
}

/// Database row for match_results table. One per match at most.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MatchResult {
    pub match_id: Uuid,
    pub home_goals: i32,
    pub guest_goals: i32,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}
