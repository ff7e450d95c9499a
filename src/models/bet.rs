use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row for bets table.
///
/// `result` stays `None` until the match has a result; afterwards it holds
/// the signed payoff last applied to the owner's balance.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Bet {
    pub id: Uuid,
    pub user_id: Uuid,
    pub match_id: Uuid,
    pub choice_team_id: Uuid,
    pub amount: Decimal,
    pub result: Option<Decimal>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}
