//! Transaction and refund routes.

use axum::{Json, Router, extract::State, routing::post};

use tillgate_shared::auth::{OperationRequest, OperationResponse, RefundRequest};

use crate::AppState;
use crate::error::ApiError;
use crate::extractors::{ClientKey, SessionToken};
use crate::gateway::TransactionGateway;

/// Creates the transactions router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/transactions", post(submit))
        .route("/refunds", post(refund))
}

/// POST /transactions - Apply a credit or debit.
async fn submit(
    State(state): State<AppState>,
    client: ClientKey,
    token: SessionToken,
    Json(payload): Json<OperationRequest>,
) -> Result<Json<OperationResponse>, ApiError> {
    let gateway = TransactionGateway::new(&state);
    let response = gateway
        .submit_operation(&client.0, token.as_deref(), payload)
        .await?;
    Ok(Json(response))
}

/// POST /refunds - Refund a previously applied entry.
async fn refund(
    State(state): State<AppState>,
    client: ClientKey,
    token: SessionToken,
    Json(payload): Json<RefundRequest>,
) -> Result<Json<OperationResponse>, ApiError> {
    let gateway = TransactionGateway::new(&state);
    let response = gateway.refund(&client.0, token.as_deref(), payload).await?;
    Ok(Json(response))
}
