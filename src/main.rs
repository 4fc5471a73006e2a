use anyhow::Context;
use tracing_subscriber::EnvFilter;

use supplier_hub::app::{self, AppState};
use supplier_hub::auth::TokenService;
use supplier_hub::config;
use supplier_hub::database::DatabaseManager;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = config::config();
    tracing::info!("Starting Supplier Hub in {:?} mode", config.environment);
    config
        .validate()
        .map_err(|msg| anyhow::anyhow!("invalid configuration: {}", msg))?;

    let store = DatabaseManager::open(&config.database)
        .await
        .context("failed to open store")?;
    let tokens = TokenService::from_config(&config.security).context("failed to build token service")?;

    let state = AppState::new(store, tokens);
    let router = app::app(state, config);

    let bind_addr = format!("0.0.0.0:{}", config.api.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Supplier Hub listening on http://{}", bind_addr);
    axum::serve(listener, router).await.context("server error")?;

    Ok(())
}
