use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgExecutor;
use uuid::Uuid;

use crate::models::Match;

pub async fn create_match<'e>(
    executor: impl PgExecutor<'e>,
    tournament_id: Uuid,
    home_team_id: Uuid,
    guest_team_id: Uuid,
    start_time: DateTime<Utc>,
    spread: Decimal,
) -> anyhow::Result<Match> {
    let game = sqlx::query_as::<_, Match>(
        r#"
        INSERT INTO matches (tournament_id, home_team_id, guest_team_id, start_time, spread)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(tournament_id)
    .bind(home_team_id)
    .bind(guest_team_id)
    .bind(start_time)
    .bind(spread)
    .fetch_one(executor)
    .await?;

    Ok(game)
}

pub async fn get_match<'e>(executor: impl PgExecutor<'e>, id: Uuid) -> anyhow::Result<Option<Match>> {
    let game = sqlx::query_as::<_, Match>("SELECT * FROM matches WHERE id = $1")
        .bind(id)
        .fetch_optional(executor)
        .await?;

    Ok(game)
}

/// Lock a match row for the rest of the transaction.
pub async fn get_match_for_update<'e>(
    executor: impl PgExecutor<'e>,
    id: Uuid,
) -> anyhow::Result<Option<Match>> {
    let game = sqlx::query_as::<_, Match>("SELECT * FROM matches WHERE id = $1 FOR UPDATE")
        .bind(id)
        .fetch_optional(executor)
        .await?;

    Ok(game)
}

/// Matches of a tournament in kick-off order, optionally starting no
/// earlier than `start_from`.
pub async fn list_tournament_matches<'e>(
    executor: impl PgExecutor<'e>,
    tournament_id: Uuid,
    start_from: Option<DateTime<Utc>>,
    limit: i64,
    offset: i64,
) -> anyhow::Result<Vec<Match>> {
    let matches = sqlx::query_as::<_, Match>(
        r#"
        SELECT * FROM matches
        WHERE tournament_id = $1
          AND ($2::TIMESTAMPTZ IS NULL OR start_time >= $2)
        ORDER BY start_time ASC
        LIMIT $3 OFFSET $4
        "#,
    )
    .bind(tournament_id)
    .bind(start_from)
    .bind(limit)
    .bind(offset)
    .fetch_all(executor)
    .await?;

    Ok(matches)
}

pub async fn update_spread<'e>(
    executor: impl PgExecutor<'e>,
    id: Uuid,
    spread: Decimal,
) -> anyhow::Result<Match> {
    let game = sqlx::query_as::<_, Match>(
        r#"
        UPDATE matches
        SET spread = $2, updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(spread)
    .fetch_one(executor)
    .await?;

    Ok(game)
}

pub async fn get_matches_by_ids<'e>(
    executor: impl PgExecutor<'e>,
    ids: &[Uuid],
) -> anyhow::Result<Vec<Match>> {
    let matches = sqlx::query_as::<_, Match>("SELECT * FROM matches WHERE id = ANY($1)")
        .bind(ids)
        .fetch_all(executor)
        .await?;

    Ok(matches)
}
