use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use salon::app::build_app;
use salon::config::AppConfig;
use salon::db::{self, SqliteStore};
use salon::services::auth::bootstrap_admin;
use salon::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();
    if config.session_secret == "changeme" {
        tracing::warn!("SESSION_SECRET not set, using the development default");
    }

    let conn = db::init_db(&config.database_url)?;
    let store = SqliteStore::new(conn);

    bootstrap_admin(&store, &config).await?;

    let addr = format!("0.0.0.0:{}", config.port);
    let state = Arc::new(AppState::new(store, config));
    let app = build_app(state);

    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
