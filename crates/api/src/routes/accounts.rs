//! Account registration and balance routes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Json, Router, routing::get, routing::post};
use uuid::Uuid;

use tillgate_shared::auth::{AccountView, BalanceResponse, RegisterAccountRequest};

use crate::AppState;
use crate::error::ApiError;
use crate::extractors::{ClientKey, SessionToken};
use crate::gateway::TransactionGateway;

/// Creates the accounts router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/accounts", post(register))
        .route("/accounts/{id}/balance", get(balance))
}

/// POST /accounts - Register an account (admin only).
async fn register(
    State(state): State<AppState>,
    client: ClientKey,
    token: SessionToken,
    Json(payload): Json<RegisterAccountRequest>,
) -> Result<(StatusCode, Json<AccountView>), ApiError> {
    let gateway = TransactionGateway::new(&state);
    let account = gateway
        .register_account(&client.0, token.as_deref(), payload)
        .await?;
    Ok((StatusCode::CREATED, Json(account)))
}

/// GET /accounts/{id}/balance - Read an account balance.
async fn balance(
    State(state): State<AppState>,
    client: ClientKey,
    token: SessionToken,
    Path(id): Path<Uuid>,
) -> Result<Json<BalanceResponse>, ApiError> {
    let gateway = TransactionGateway::new(&state);
    let response = gateway.balance(&client.0, token.as_deref(), id).await?;
    Ok(Json(response))
}
