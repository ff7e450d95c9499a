use std::env;

use crate::settlement::BetWindow;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub db_max_connections: u32,

    // Operator token for write routes (empty / unset disables the check)
    pub api_token: Option<String>,

    // Betting
    pub bet_lead_minutes: i64,
    pub page_size: i64,

    // Logging
    pub log_format: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".into())
                .parse()?,
            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "10".into())
                .parse()
                .unwrap_or(10),

            api_token: env::var("API_TOKEN").ok().filter(|t| !t.is_empty()),

            bet_lead_minutes: env::var("BET_LEAD_MINUTES")
                .unwrap_or_else(|_| "30".into())
                .parse()
                .unwrap_or(30),
            page_size: env::var("PAGE_SIZE")
                .unwrap_or_else(|_| "10".into())
                .parse()
                .unwrap_or(10),

            log_format: env::var("LOG_FORMAT").unwrap_or_else(|_| "text".into()),
        })
    }

    /// Config with defaults for everything except the database URL.
    pub fn with_database_url(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            host: "127.0.0.1".into(),
            port: 0,
            db_max_connections: 5,
            api_token: None,
            bet_lead_minutes: 30,
            page_size: 10,
            log_format: "text".into(),
        }
    }

    pub fn bet_window(&self) -> BetWindow {
        BetWindow::new(self.bet_lead_minutes)
    }
}
