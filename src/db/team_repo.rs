use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use crate::models::Team;

/// Insert a team and register it in the given tournaments.
pub async fn create_team(
    pool: &PgPool,
    name: &str,
    founded_at: i32,
    tournament_ids: &[Uuid],
) -> anyhow::Result<Team> {
    let mut tx = pool.begin().await?;

    let team = sqlx::query_as::<_, Team>(
        "INSERT INTO teams (name, founded_at) VALUES ($1, $2) RETURNING *",
    )
    .bind(name)
    .bind(founded_at)
    .fetch_one(&mut *tx)
    .await?;

    for tournament_id in tournament_ids {
        sqlx::query(
            r#"
            INSERT INTO team_tournaments (team_id, tournament_id)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(team.id)
        .bind(tournament_id)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(team)
}

pub async fn get_team<'e>(executor: impl PgExecutor<'e>, id: Uuid) -> anyhow::Result<Option<Team>> {
    let team = sqlx::query_as::<_, Team>("SELECT * FROM teams WHERE id = $1")
        .bind(id)
        .fetch_optional(executor)
        .await?;

    Ok(team)
}

pub async fn list_teams<'e>(executor: impl PgExecutor<'e>) -> anyhow::Result<Vec<Team>> {
    let teams = sqlx::query_as::<_, Team>("SELECT * FROM teams ORDER BY name")
        .fetch_all(executor)
        .await?;

    Ok(teams)
}

/// Whether a team is registered in a tournament.
pub async fn is_registered<'e>(
    executor: impl PgExecutor<'e>,
    team_id: Uuid,
    tournament_id: Uuid,
) -> anyhow::Result<bool> {
    let row: (bool,) = sqlx::query_as(
        r#"
        SELECT EXISTS (
            SELECT 1 FROM team_tournaments WHERE team_id = $1 AND tournament_id = $2
        )
        "#,
    )
    .bind(team_id)
    .bind(tournament_id)
    .fetch_one(executor)
    .await?;

    Ok(row.0)
}
