mod agent;
mod config;
mod errors;
mod mailer;
mod models;
mod routes;
mod state;
mod transport;

use std::sync::Arc;

use tracing::{error, info};

use crate::agent::ChatRelay;
use crate::config::AppConfig;
use crate::mailer::EmailDispatcher;
use crate::state::AppState;
use crate::transport::ReqwestClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present (development convenience)
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "portfolio_relay=debug,tower_http=debug".into()),
        )
        .init();

    // ── Configuration ─────────────────────────────────────────────────────────
    let config = AppConfig::from_env()?;
    for key in config.missing_keys() {
        error!("{key} missing in environment!");
    }

    // ── Dependency wiring ─────────────────────────────────────────────────────
    let AppConfig { port, mail, chat, .. } = config;
    let http = Arc::new(ReqwestClient::new());
    let dispatcher = EmailDispatcher::new(http.clone(), mail);
    let relay = ChatRelay::new(http, chat);

    let app = routes::router(AppState::new(dispatcher, relay));

    // ── Listen ────────────────────────────────────────────────────────────────
    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server running on http://{addr}/");

    axum::serve(listener, app).await?;
    Ok(())
}
