use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// User-facing, recoverable domain errors. Each carries a stable numeric
/// code that clients can match on; the display text is the message shown
/// to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BettingError {
    #[error("Start date cannot after end date")]
    TournamentStartAfterEnd,

    #[error("Start time of match cannot before start date of tournament")]
    MatchStartBeforeTournament,

    #[error("Start time of match cannot after end date of tournament")]
    MatchStartAfterTournament,

    #[error("One match cannot be created by only one team")]
    MatchSingleTeam,

    #[error("Tournament of match is not in the list tournaments of 2 teams")]
    MatchTeamNotInTournament,

    #[error("Spread must be a quarter point between -5 and 5")]
    InvalidSpread,

    #[error("Bet on this match is expired")]
    BetExpired,

    #[error("Bet amount is not one of the allowed stakes")]
    InvalidBetAmount,

    #[error("Chosen team does not play in this match")]
    InvalidBetChoice,

    #[error("Match has no result yet")]
    MatchHasNoResult,

    #[error("Match already has a result")]
    ResultAlreadyRecorded,

    #[error("Goal counts cannot be negative")]
    InvalidGoals,
}

impl BettingError {
    pub fn code(&self) -> u32 {
        match self {
            BettingError::TournamentStartAfterEnd => 101,
            BettingError::MatchStartBeforeTournament => 102,
            BettingError::MatchStartAfterTournament => 103,
            BettingError::MatchSingleTeam => 104,
            BettingError::MatchTeamNotInTournament => 105,
            BettingError::InvalidSpread => 106,
            BettingError::BetExpired => 201,
            BettingError::InvalidBetAmount => 202,
            BettingError::InvalidBetChoice => 203,
            BettingError::MatchHasNoResult => 301,
            BettingError::ResultAlreadyRecorded => 302,
            BettingError::InvalidGoals => 303,
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            BettingError::ResultAlreadyRecorded => StatusCode::CONFLICT,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error(transparent)]
    Betting(#[from] BettingError),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_code: Option<u32>,
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, None, msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, None, msg.clone()),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, None, "Unauthorized".into()),
            AppError::Betting(e) => (e.status(), Some(e.code()), e.to_string()),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (StatusCode::INTERNAL_SERVER_ERROR, None, "Internal server error".into())
            }
        };

        (
            status,
            Json(ErrorBody {
                success: false,
                error_code: code,
                error: message,
            }),
        )
            .into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::Internal(e.into())
    }
}
