use rust_decimal::Decimal;
use sqlx::PgExecutor;
use uuid::Uuid;

use crate::models::Bet;

pub async fn insert_bet<'e>(
    executor: impl PgExecutor<'e>,
    user_id: Uuid,
    match_id: Uuid,
    choice_team_id: Uuid,
    amount: Decimal,
) -> anyhow::Result<Bet> {
    let bet = sqlx::query_as::<_, Bet>(
        r#"
        INSERT INTO bets (user_id, match_id, choice_team_id, amount)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(match_id)
    .bind(choice_team_id)
    .bind(amount)
    .fetch_one(executor)
    .await?;

    Ok(bet)
}

pub async fn get_bet<'e>(executor: impl PgExecutor<'e>, id: Uuid) -> anyhow::Result<Option<Bet>> {
    let bet = sqlx::query_as::<_, Bet>("SELECT * FROM bets WHERE id = $1")
        .bind(id)
        .fetch_optional(executor)
        .await?;

    Ok(bet)
}

/// The bet a user already holds on a match, if any.
pub async fn find_user_bet<'e>(
    executor: impl PgExecutor<'e>,
    user_id: Uuid,
    match_id: Uuid,
) -> anyhow::Result<Option<Bet>> {
    let bet = sqlx::query_as::<_, Bet>(
        "SELECT * FROM bets WHERE user_id = $1 AND match_id = $2 ORDER BY created_at LIMIT 1",
    )
    .bind(user_id)
    .bind(match_id)
    .fetch_optional(executor)
    .await?;

    Ok(bet)
}

/// Change the choice and stake of an unsettled bet.
pub async fn update_bet<'e>(
    executor: impl PgExecutor<'e>,
    id: Uuid,
    choice_team_id: Uuid,
    amount: Decimal,
) -> anyhow::Result<Bet> {
    let bet = sqlx::query_as::<_, Bet>(
        r#"
        UPDATE bets
        SET choice_team_id = $2, amount = $3, updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(choice_team_id)
    .bind(amount)
    .fetch_one(executor)
    .await?;

    Ok(bet)
}

pub async fn delete_bet<'e>(executor: impl PgExecutor<'e>, id: Uuid) -> anyhow::Result<()> {
    sqlx::query("DELETE FROM bets WHERE id = $1")
        .bind(id)
        .execute(executor)
        .await?;

    Ok(())
}

/// All bets on a match, locked for settlement.
pub async fn get_bets_for_match_for_update<'e>(
    executor: impl PgExecutor<'e>,
    match_id: Uuid,
) -> anyhow::Result<Vec<Bet>> {
    let bets = sqlx::query_as::<_, Bet>(
        "SELECT * FROM bets WHERE match_id = $1 ORDER BY created_at FOR UPDATE",
    )
    .bind(match_id)
    .fetch_all(executor)
    .await?;

    Ok(bets)
}

pub async fn get_bets_for_match<'e>(
    executor: impl PgExecutor<'e>,
    match_id: Uuid,
) -> anyhow::Result<Vec<Bet>> {
    let bets = sqlx::query_as::<_, Bet>(
        "SELECT * FROM bets WHERE match_id = $1 ORDER BY created_at",
    )
    .bind(match_id)
    .fetch_all(executor)
    .await?;

    Ok(bets)
}

/// Store the payoff computed for a bet.
pub async fn set_result<'e>(
    executor: impl PgExecutor<'e>,
    id: Uuid,
    payoff: Decimal,
) -> anyhow::Result<()> {
    sqlx::query("UPDATE bets SET result = $2, updated_at = NOW() WHERE id = $1")
        .bind(id)
        .bind(payoff)
        .execute(executor)
        .await?;

    Ok(())
}

/// A user's bets, most recently modified first.
pub async fn get_user_bets<'e>(
    executor: impl PgExecutor<'e>,
    user_id: Uuid,
    limit: i64,
    offset: i64,
) -> anyhow::Result<Vec<Bet>> {
    let bets = sqlx::query_as::<_, Bet>(
        r#"
        SELECT * FROM bets
        WHERE user_id = $1
        ORDER BY updated_at DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(user_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(executor)
    .await?;

    Ok(bets)
}

/// A user's settled bets, most recently settled first.
pub async fn get_user_settled_bets<'e>(
    executor: impl PgExecutor<'e>,
    user_id: Uuid,
    limit: i64,
    offset: i64,
) -> anyhow::Result<Vec<Bet>> {
    let bets = sqlx::query_as::<_, Bet>(
        r#"
        SELECT * FROM bets
        WHERE user_id = $1 AND result IS NOT NULL
        ORDER BY updated_at DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(user_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(executor)
    .await?;

    Ok(bets)
}
