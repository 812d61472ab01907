//! Authentication routes: login and logout.

use axum::{Json, Router, extract::State, routing::post};
use serde_json::{Value, json};

use tillgate_shared::auth::{LoginRequest, LoginResponse};

use crate::AppState;
use crate::error::ApiError;
use crate::extractors::{ClientKey, SessionToken};
use crate::gateway::TransactionGateway;

/// Creates the auth router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
}

/// POST /auth/login - Authenticate an account and issue a session token.
async fn login(
    State(state): State<AppState>,
    client: ClientKey,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let gateway = TransactionGateway::new(&state);
    let response = gateway.authenticate(&client.0, payload).await?;
    Ok(Json(response))
}

/// POST /auth/logout - Revoke the presented session token.
async fn logout(
    State(state): State<AppState>,
    client: ClientKey,
    token: SessionToken,
) -> Result<Json<Value>, ApiError> {
    let gateway = TransactionGateway::new(&state);
    gateway.logout(&client.0, token.as_deref())?;
    Ok(Json(json!({ "status": "revoked" })))
}
