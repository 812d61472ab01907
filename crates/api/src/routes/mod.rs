//! API route definitions.

use axum::Router;

use crate::AppState;

pub mod accounts;
pub mod auth;
pub mod health;
pub mod transactions;

/// Creates the `/api/v1` router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(auth::routes())
        .merge(accounts::routes())
        .merge(transactions::routes())
}
