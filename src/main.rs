//! Venue Desk - event venue rental and sales service
//!
//! Browse venues, book or cancel a rental, buy a venue outright, and ask a
//! venue assistant about availability.

mod api;
mod assistant;
mod booking;
mod config;
mod db;
mod lifecycle;

use api::{create_router, with_static_files, AppState};
use assistant::{AgentClient, Assistant, HttpAgentClient};
use booking::BookingManager;
use config::Config;
use db::Database;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Agent credentials may live in a local .env file
    let dotenv_loaded = config::load_dotenv(Path::new(".env"))?;

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "venue_desk=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    if dotenv_loaded {
        tracing::info!("Loaded environment variables from .env");
    }
    let config = Config::from_env();

    // Ensure database directory exists
    if let Some(parent) = config.db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    // Initialize database
    tracing::info!(path = %config.db_path.display(), "Opening database");
    let db = Database::open(&config.db_path)?;
    db.seed_if_empty()?;

    // Assistant mode is fixed for the life of the process
    let agent: Option<Arc<dyn AgentClient>> = match HttpAgentClient::from_config(&config.agent)? {
        Some(client) => {
            tracing::info!(endpoint = %client.endpoint(), "Venue assistant delegating to agent");
            Some(Arc::new(client))
        }
        None => {
            tracing::warn!(
                "No agent credentials configured. Set SMYTHOS_API_KEY and SMYTHOS_AGENT_ID; using offline responder."
            );
            None
        }
    };

    // Create application state
    let state = AppState::new(BookingManager::new(db.clone()), Assistant::new(db, agent));
    tracing::debug!(delegated = state.assistant.is_delegated(), "Application state ready");

    // Create router
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let compression = CompressionLayer::new()
        .gzip(true)
        .br(true)
        .deflate(true)
        .zstd(true);

    let app = with_static_files(create_router(state), &config.public_dir, &config.frontend_dist)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(compression);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Venue desk listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
