//! Gateway-wide error taxonomy.
//!
//! Every failure surfaced to a client maps to exactly one variant here, with
//! a stable error code and HTTP status. Internal diagnostic detail (database
//! errors, stack traces) never crosses this boundary.

use serde::Serialize;
use thiserror::Error;

/// Result type alias using `GatewayError`.
pub type GatewayResult<T> = Result<T, GatewayError>;

/// A single field that failed structural validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// The offending field name.
    pub field: String,
    /// Human-readable description of the violation.
    pub message: String,
}

impl FieldError {
    /// Creates a new field error.
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Gateway error taxonomy.
///
/// `AuthenticationFailed` is deliberately identical for an unknown account
/// and a wrong secret, to prevent account enumeration.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Bad credentials (unknown account or wrong secret).
    #[error("Invalid account or secret")]
    AuthenticationFailed,

    /// Session token is missing or malformed.
    #[error("Invalid or missing session token")]
    TokenInvalid,

    /// Session token has expired.
    #[error("Session token has expired")]
    TokenExpired,

    /// Session token has been revoked.
    #[error("Session token has been revoked")]
    TokenRevoked,

    /// Valid identity, but the role lacks permission.
    #[error("Access denied: {0}")]
    Forbidden(String),

    /// Client exceeded the configured rate-limit threshold.
    #[error("Too many requests, try again later")]
    RateLimited,

    /// Structural validation failed; all offending fields are listed.
    #[error("Validation failed")]
    ValidationFailed(Vec<FieldError>),

    /// A debit would drive the account balance negative.
    #[error("Insufficient funds")]
    InsufficientFunds,

    /// The target account is disabled.
    #[error("Account is disabled")]
    AccountDisabled,

    /// Transient storage failure; safe to retry with the same
    /// idempotency key.
    #[error("Storage temporarily unavailable, retry with the same idempotency key")]
    StorageUnavailable,

    /// Unexpected failure; detail is logged server-side only.
    #[error("Internal error")]
    Internal(String),
}

impl GatewayError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::AuthenticationFailed
            | Self::TokenInvalid
            | Self::TokenExpired
            | Self::TokenRevoked => 401,
            Self::Forbidden(_) | Self::AccountDisabled => 403,
            Self::RateLimited => 429,
            Self::ValidationFailed(_) => 422,
            Self::InsufficientFunds => 409,
            Self::StorageUnavailable => 503,
            Self::Internal(_) => 500,
        }
    }

    /// Returns the stable error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::AuthenticationFailed => "AUTHENTICATION_FAILED",
            Self::TokenInvalid => "TOKEN_INVALID",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::TokenRevoked => "TOKEN_REVOKED",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::RateLimited => "RATE_LIMITED",
            Self::ValidationFailed(_) => "VALIDATION_FAILED",
            Self::InsufficientFunds => "INSUFFICIENT_FUNDS",
            Self::AccountDisabled => "ACCOUNT_DISABLED",
            Self::StorageUnavailable => "STORAGE_UNAVAILABLE",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns the validation field list, if any.
    #[must_use]
    pub fn fields(&self) -> Option<&[FieldError]> {
        match self {
            Self::ValidationFailed(fields) => Some(fields),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(GatewayError::AuthenticationFailed.status_code(), 401);
        assert_eq!(GatewayError::TokenInvalid.status_code(), 401);
        assert_eq!(GatewayError::TokenExpired.status_code(), 401);
        assert_eq!(GatewayError::TokenRevoked.status_code(), 401);
        assert_eq!(GatewayError::Forbidden(String::new()).status_code(), 403);
        assert_eq!(GatewayError::RateLimited.status_code(), 429);
        assert_eq!(GatewayError::ValidationFailed(vec![]).status_code(), 422);
        assert_eq!(GatewayError::InsufficientFunds.status_code(), 409);
        assert_eq!(GatewayError::AccountDisabled.status_code(), 403);
        assert_eq!(GatewayError::StorageUnavailable.status_code(), 503);
        assert_eq!(GatewayError::Internal(String::new()).status_code(), 500);
    }

    #[test]
    fn test_error_codes_are_stable() {
        assert_eq!(
            GatewayError::AuthenticationFailed.error_code(),
            "AUTHENTICATION_FAILED"
        );
        assert_eq!(GatewayError::RateLimited.error_code(), "RATE_LIMITED");
        assert_eq!(
            GatewayError::ValidationFailed(vec![]).error_code(),
            "VALIDATION_FAILED"
        );
        assert_eq!(
            GatewayError::InsufficientFunds.error_code(),
            "INSUFFICIENT_FUNDS"
        );
        assert_eq!(
            GatewayError::StorageUnavailable.error_code(),
            "STORAGE_UNAVAILABLE"
        );
    }

    #[test]
    fn test_validation_fields_accessor() {
        let err = GatewayError::ValidationFailed(vec![
            FieldError::new("amount", "amount must be positive"),
            FieldError::new("account_id", "account_id required"),
        ]);
        let fields = err.fields().unwrap();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].field, "amount");

        assert!(GatewayError::RateLimited.fields().is_none());
    }

    #[test]
    fn test_internal_detail_not_in_display() {
        // The Display form shown to clients must never carry the detail.
        let err = GatewayError::Internal("connection pool exhausted".to_string());
        assert_eq!(err.to_string(), "Internal error");
    }
}
