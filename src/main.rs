mod config;
mod errors;
mod models;
mod routes;
mod service;
mod webhook;

use tracing::info;

use crate::config::ServerConfig;
use crate::service::chat_service::ChatService;
use crate::webhook::WebhookClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present (development convenience)
    dotenvy::dotenv().ok();

    // Initialise tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "atdigital_chat=debug,atdigital_chat_core=debug,tower_http=debug".into()),
        )
        .init();

    // ── Configuration ─────────────────────────────────────────────────────────
    let config = ServerConfig::from_env()?;

    // ── Dependency wiring ─────────────────────────────────────────────────────
    let webhook = WebhookClient::new(&config.webhook_url);
    info!("Relaying chat messages to {}", webhook.url());
    let chat_service = ChatService::new(webhook);

    // ── Router ────────────────────────────────────────────────────────────────
    if let Some(dir) = &config.widget_dist_dir {
        info!("Serving widget bundle from {}", dir.display());
    }
    let app = routes::router(chat_service, config.widget_dist_dir.as_deref());

    // ── Listen ────────────────────────────────────────────────────────────────
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on http://{addr}/");

    axum::serve(listener, app).await?;
    Ok(())
}
