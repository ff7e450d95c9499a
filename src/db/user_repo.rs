use rust_decimal::Decimal;
use sqlx::PgExecutor;
use uuid::Uuid;

use crate::models::User;

/// Insert a new user with a zero balance.
pub async fn create_user<'e>(executor: impl PgExecutor<'e>, username: &str) -> anyhow::Result<User> {
    let user = sqlx::query_as::<_, User>(
        "INSERT INTO users (username) VALUES ($1) RETURNING *",
    )
    .bind(username)
    .fetch_one(executor)
    .await?;

    Ok(user)
}

pub async fn get_user<'e>(executor: impl PgExecutor<'e>, id: Uuid) -> anyhow::Result<Option<User>> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(executor)
        .await?;

    Ok(user)
}

pub async fn get_user_by_username<'e>(
    executor: impl PgExecutor<'e>,
    username: &str,
) -> anyhow::Result<Option<User>> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
        .bind(username)
        .fetch_optional(executor)
        .await?;

    Ok(user)
}

/// Add `delta` (signed) to a user's balance and return the new balance.
pub async fn adjust_balance<'e>(
    executor: impl PgExecutor<'e>,
    id: Uuid,
    delta: Decimal,
) -> anyhow::Result<Decimal> {
    let row: (Decimal,) = sqlx::query_as(
        r#"
        UPDATE users
        SET balance = balance + $2, updated_at = NOW()
        WHERE id = $1
        RETURNING balance
        "#,
    )
    .bind(id)
    .bind(delta)
    .fetch_one(executor)
    .await?;

    Ok(row.0)
}
