//! Tillgate API Server
//!
//! Main entry point for the transaction gateway service.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tillgate_api::{AppState, create_router};
use tillgate_core::guard::RateLimiter;
use tillgate_db::connect;
use tillgate_shared::{AppConfig, TokenConfig, TokenService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tillgate=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().map_err(|e| anyhow::anyhow!("failed to load config: {e}"))?;

    // Connect to database
    let db = connect(&config.database).await?;
    info!("Connected to database");

    // Session token service
    let tokens = TokenService::new(TokenConfig::from(&config.token));

    // Per-client rate limiter, with a background sweep of idle windows
    let limiter = Arc::new(RateLimiter::new(
        config.rate_limit.threshold,
        Duration::from_secs(config.rate_limit.window_secs),
    ));
    let sweep_interval = Duration::from_secs(config.rate_limit.window_secs * 2);
    let sweeper = Arc::clone(&limiter);
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(sweep_interval);
        loop {
            interval.tick().await;
            sweeper.prune_stale();
        }
    });

    // Create application state
    let state = AppState {
        db: Arc::new(db),
        tokens: Arc::new(tokens),
        limiter,
    };

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
