use bettings::api::router::create_router;
use bettings::config::AppConfig;
use bettings::{db, metrics, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()?;
    init_tracing(&config.log_format);

    let addr = format!("{}:{}", config.host, config.port);

    tracing::info!("Connecting to database...");
    let db = db::init_pool(&config.database_url, config.db_max_connections).await?;
    db::run_migrations(&db).await?;
    tracing::info!("Database connected, migrations applied");

    let metrics_handle = metrics::init_metrics();

    tracing::info!(
        bet_lead_minutes = config.bet_lead_minutes,
        operator_auth = config.api_token.is_some(),
        "Betting service configured"
    );
    if config.api_token.is_none() {
        tracing::warn!("API_TOKEN is not set; operator routes are unauthenticated");
    }

    let state = AppState {
        db,
        config,
        metrics_handle,
    };
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {addr}");
    axum::serve(listener, router).await?;

    Ok(())
}

fn init_tracing(format: &str) {
    use tracing_subscriber::{fmt, EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("bettings=info,tower_http=info"));

    if format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer())
            .init();
    }
}
