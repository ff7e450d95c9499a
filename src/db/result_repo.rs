use sqlx::PgExecutor;
use uuid::Uuid;

use crate::models::MatchResult;

/// Insert the result of a match. Fails on the primary key if one exists.
pub async fn insert_result<'e>(
    executor: impl PgExecutor<'e>,
    match_id: Uuid,
    home_goals: i32,
    guest_goals: i32,
) -> anyhow::Result<MatchResult> {
    let result = sqlx::query_as::<_, MatchResult>(
        r#"
        INSERT INTO match_results (match_id, home_goals, guest_goals)
        VALUES ($1, $2, $3)
        RETURNING *
        "#,
    )
    .bind(match_id)
    .bind(home_goals)
    .bind(guest_goals)
    .fetch_one(executor)
    .await?;

    Ok(result)
}

pub async fn update_result<'e>(
    executor: impl PgExecutor<'e>,
    match_id: Uuid,
    home_goals: i32,
    guest_goals: i32,
) -> anyhow::Result<Option<MatchResult>> {
    let result = sqlx::query_as::<_, MatchResult>(
        r#"
        UPDATE match_results
        SET home_goals = $2, guest_goals = $3, updated_at = NOW()
        WHERE match_id = $1
        RETURNING *
        "#,
    )
    .bind(match_id)
    .bind(home_goals)
    .bind(guest_goals)
    .fetch_optional(executor)
    .await?;

    Ok(result)
}

pub async fn get_result<'e>(
    executor: impl PgExecutor<'e>,
    match_id: Uuid,
) -> anyhow::Result<Option<MatchResult>> {
    let result = sqlx::query_as::<_, MatchResult>("SELECT * FROM match_results WHERE match_id = $1")
        .bind(match_id)
        .fetch_optional(executor)
        .await?;

    Ok(result)
}

pub async fn has_result<'e>(executor: impl PgExecutor<'e>, match_id: Uuid) -> anyhow::Result<bool> {
    let row: (bool,) = sqlx::query_as(
        "SELECT EXISTS (SELECT 1 FROM match_results WHERE match_id = $1)",
    )
    .bind(match_id)
    .fetch_one(executor)
    .await?;

    Ok(row.0)
}

/// Results for a set of matches, used when rendering listings.
pub async fn get_results_for_matches<'e>(
    executor: impl PgExecutor<'e>,
    match_ids: &[Uuid],
) -> anyhow::Result<Vec<MatchResult>> {
    let results = sqlx::query_as::<_, MatchResult>(
        "SELECT * FROM match_results WHERE match_id = ANY($1)",
    )
    .bind(match_ids)
    .fetch_all(executor)
    .await?;

    Ok(results)
}
