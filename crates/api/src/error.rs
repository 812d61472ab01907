//! HTTP response mapping for the gateway error taxonomy.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};

use tillgate_shared::GatewayError;

/// A `GatewayError` carried to the HTTP boundary.
#[derive(Debug)]
pub struct ApiError(pub GatewayError);

impl From<GatewayError> for ApiError {
    fn from(err: GatewayError) -> Self {
        Self(err)
    }
}

impl ApiError {
    /// Builds the JSON failure body: stable code, safe message, and the
    /// field list for validation failures.
    #[must_use]
    pub fn body(&self) -> Value {
        let mut body = json!({
            "error": self.0.error_code(),
            "message": self.0.to_string(),
        });
        if let Some(fields) = self.0.fields() {
            body["fields"] = json!(fields);
        }
        body
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let GatewayError::Internal(detail) = &self.0 {
            tracing::error!(detail = %detail, "internal error surfaced to client");
        }

        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.body())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tillgate_shared::FieldError;

    #[test]
    fn test_body_has_code_and_message() {
        let err = ApiError(GatewayError::RateLimited);
        let body = err.body();
        assert_eq!(body["error"], "RATE_LIMITED");
        assert_eq!(body["message"], "Too many requests, try again later");
        assert!(body.get("fields").is_none());
    }

    #[test]
    fn test_validation_body_lists_fields() {
        let err = ApiError(GatewayError::ValidationFailed(vec![
            FieldError::new("account_id", "account_id required"),
            FieldError::new("amount", "amount must be positive"),
        ]));
        let body = err.body();
        assert_eq!(body["error"], "VALIDATION_FAILED");
        let fields = body["fields"].as_array().unwrap();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0]["field"], "account_id");
        assert_eq!(fields[1]["message"], "amount must be positive");
    }

    #[test]
    fn test_internal_detail_never_in_body() {
        let err = ApiError(GatewayError::Internal("pool exhausted at 10.0.0.3".into()));
        let body = err.body();
        assert_eq!(body["message"], "Internal error");
        assert!(!body.to_string().contains("10.0.0.3"));
    }
}
