pub mod bet_repo;
pub mod match_repo;
pub mod result_repo;
pub mod team_repo;
pub mod tournament_repo;
pub mod user_repo;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

pub async fn init_pool(database_url: &str, max_connections: u32) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;

    // Verify connectivity
    sqlx::query("SELECT 1").execute(&pool).await?;

    Ok(pool)
}

pub async fn run_migrations(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

/// 1-based page number to SQL offset.
pub fn page_offset(page: Option<i64>, page_size: i64) -> i64 {
    (page.unwrap_or(1).max(1) - 1) * page_size
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_offset() {
        assert_eq!(page_offset(None, 10), 0);
        assert_eq!(page_offset(Some(1), 10), 0);
        assert_eq!(page_offset(Some(3), 10), 20);
        assert_eq!(page_offset(Some(0), 20), 0);
        assert_eq!(page_offset(Some(-4), 20), 0);
    }
}
