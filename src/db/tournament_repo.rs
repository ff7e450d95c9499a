use chrono::NaiveDate;
use sqlx::PgExecutor;
use uuid::Uuid;

use crate::models::Tournament;

/// Optional filters for listing tournaments.
#[derive(Debug, Clone, Default)]
pub struct TournamentFilter {
    pub name: Option<String>,
    pub start_date_from: Option<NaiveDate>,
    pub end_date_until: Option<NaiveDate>,
}

pub async fn create_tournament<'e>(
    executor: impl PgExecutor<'e>,
    name: &str,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> anyhow::Result<Tournament> {
    let tournament = sqlx::query_as::<_, Tournament>(
        r#"
        INSERT INTO tournaments (name, start_date, end_date)
        VALUES ($1, $2, $3)
        RETURNING *
        "#,
    )
    .bind(name)
    .bind(start_date)
    .bind(end_date)
    .fetch_one(executor)
    .await?;

    Ok(tournament)
}

pub async fn get_tournament<'e>(
    executor: impl PgExecutor<'e>,
    id: Uuid,
) -> anyhow::Result<Option<Tournament>> {
    let tournament = sqlx::query_as::<_, Tournament>("SELECT * FROM tournaments WHERE id = $1")
        .bind(id)
        .fetch_optional(executor)
        .await?;

    Ok(tournament)
}

/// List tournaments newest first, filtered by name substring and date bounds.
pub async fn list_tournaments<'e>(
    executor: impl PgExecutor<'e>,
    filter: &TournamentFilter,
    limit: i64,
    offset: i64,
) -> anyhow::Result<Vec<Tournament>> {
    let tournaments = sqlx::query_as::<_, Tournament>(
        r#"
        SELECT * FROM tournaments
        WHERE ($1::TEXT IS NULL OR strpos(name, $1) > 0)
          AND ($2::DATE IS NULL OR start_date >= $2)
          AND ($3::DATE IS NULL OR end_date <= $3)
        ORDER BY start_date DESC
        LIMIT $4 OFFSET $5
        "#,
    )
    .bind(filter.name.as_deref())
    .bind(filter.start_date_from)
    .bind(filter.end_date_until)
    .bind(limit)
    .bind(offset)
    .fetch_all(executor)
    .await?;

    Ok(tournaments)
}
