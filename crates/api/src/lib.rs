//! HTTP API layer with Axum routes and the gateway pipeline.
//!
//! This crate provides:
//! - REST API routes
//! - The `TransactionGateway` request pipeline
//! - Request extractors and error response mapping

pub mod error;
pub mod extractors;
pub mod gateway;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use tillgate_core::guard::RateLimiter;
use tillgate_shared::TokenService;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// Session token service (issuance, verification, revocation).
    pub tokens: Arc<TokenService>,
    /// Per-client rate limiter.
    pub limiter: Arc<RateLimiter>,
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::health::routes())
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
