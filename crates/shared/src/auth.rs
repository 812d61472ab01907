//! Request and response payloads for the gateway HTTP surface.
//!
//! Every inbound payload declares its shape here with `validator` rules, so
//! structural validation happens once at the RequestGuard boundary and
//! nothing deeper in the pipeline has to re-check it. String fields default
//! to empty on absence so a missing field reports as a validation failure
//! alongside the other offending fields, not as a parse error.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::types::{AccountRole, AccountStatus, EntryStatus, OperationKind, RejectReason};

/// Login request payload.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    /// Account ID to authenticate as.
    #[serde(default)]
    #[validate(
        length(min = 1, message = "account_id required"),
        custom(function = validate_uuid)
    )]
    pub account_id: String,
    /// Plaintext secret. Never stored or logged.
    #[serde(default)]
    #[validate(length(min = 1, message = "secret required"))]
    pub secret: String,
}

/// Login response payload.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    /// Authenticated account ID.
    pub account_id: Uuid,
    /// Account role.
    pub role: AccountRole,
    /// Signed session token.
    pub access_token: String,
    /// Token type, always `Bearer`.
    pub token_type: &'static str,
    /// Seconds until the token expires.
    pub expires_in: i64,
}

/// Account registration request (admin only).
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterAccountRequest {
    /// Account ID to assign; generated when absent.
    #[validate(custom(function = validate_optional_uuid))]
    pub account_id: Option<String>,
    /// Role for the new account.
    #[serde(default)]
    #[validate(
        length(min = 1, message = "role required"),
        custom(function = validate_role)
    )]
    pub role: String,
    /// Display name shown in dashboards. Free text, sanitized.
    #[serde(default)]
    #[validate(length(
        min = 1,
        max = 120,
        message = "display_name required (at most 120 characters)"
    ))]
    pub display_name: String,
    /// Initial secret for the account.
    #[serde(default)]
    #[validate(length(
        min = 8,
        max = 128,
        message = "secret must be between 8 and 128 characters"
    ))]
    pub secret: String,
}

/// Account info returned by registration and balance reads.
#[derive(Debug, Clone, Serialize)]
pub struct AccountView {
    /// Account ID.
    pub id: Uuid,
    /// Account role.
    pub role: AccountRole,
    /// Display name.
    pub display_name: String,
    /// Current balance in minor units.
    pub balance: i64,
    /// Account status.
    pub status: AccountStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Balance-affecting operation request (credit or debit).
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct OperationRequest {
    /// Target account ID.
    #[serde(default)]
    #[validate(
        length(min = 1, message = "account_id required"),
        custom(function = validate_uuid)
    )]
    pub account_id: String,
    /// Operation kind: `credit` or `debit`.
    #[serde(default)]
    #[validate(
        length(min = 1, message = "kind required"),
        custom(function = validate_operation_kind)
    )]
    pub kind: String,
    /// Amount in minor units; strictly positive.
    #[serde(default)]
    #[validate(range(min = 1, message = "amount must be positive"))]
    pub amount: i64,
    /// Client-supplied idempotency key; retries must reuse it.
    #[serde(default)]
    #[validate(
        length(min = 1, message = "idempotency_key required"),
        custom(function = validate_idempotency_key)
    )]
    pub idempotency_key: String,
    /// Optional free-text note. Sanitized before storage.
    #[validate(length(max = 500, message = "note must be at most 500 characters"))]
    pub note: Option<String>,
}

/// Refund request, referencing the original ledger entry.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RefundRequest {
    /// Account whose entry is being refunded.
    #[serde(default)]
    #[validate(
        length(min = 1, message = "account_id required"),
        custom(function = validate_uuid)
    )]
    pub account_id: String,
    /// The original applied entry to refund.
    #[serde(default)]
    #[validate(
        length(min = 1, message = "entry_id required"),
        custom(function = validate_uuid)
    )]
    pub entry_id: String,
    /// Amount in minor units; strictly positive.
    #[serde(default)]
    #[validate(range(min = 1, message = "amount must be positive"))]
    pub amount: i64,
    /// Client-supplied idempotency key; retries must reuse it.
    #[serde(default)]
    #[validate(
        length(min = 1, message = "idempotency_key required"),
        custom(function = validate_idempotency_key)
    )]
    pub idempotency_key: String,
    /// Optional free-text note. Sanitized before storage.
    #[validate(length(max = 500, message = "note must be at most 500 characters"))]
    pub note: Option<String>,
}

/// One immutable ledger entry, as returned to clients.
#[derive(Debug, Clone, Serialize)]
pub struct LedgerEntryView {
    /// Entry ID.
    pub id: Uuid,
    /// Account the entry belongs to.
    pub account_id: Uuid,
    /// Idempotency key the entry was created under.
    pub idempotency_key: String,
    /// Operation kind.
    pub kind: OperationKind,
    /// Amount in minor units.
    pub amount: i64,
    /// Account balance after this entry.
    pub resulting_balance: i64,
    /// Terminal entry status.
    pub status: EntryStatus,
    /// Rejection reason, when rejected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reject_reason: Option<RejectReason>,
    /// The refunded entry, for refunds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refund_of: Option<Uuid>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Response for a balance-affecting operation.
#[derive(Debug, Clone, Serialize)]
pub struct OperationResponse {
    /// The ledger entry recording the operation.
    pub entry: LedgerEntryView,
    /// The account balance after the operation.
    pub balance: i64,
}

/// Point-in-time balance read.
///
/// The balance may change the moment this response is produced; callers
/// must not treat it as a reservation.
#[derive(Debug, Clone, Serialize)]
pub struct BalanceResponse {
    /// Account ID.
    pub account_id: Uuid,
    /// Balance in minor units at read time.
    pub balance: i64,
    /// Read timestamp.
    pub as_of: DateTime<Utc>,
}

fn validate_uuid(value: &str) -> Result<(), ValidationError> {
    // Emptiness is reported by the length rule.
    if value.is_empty() || Uuid::parse_str(value).is_ok() {
        Ok(())
    } else {
        Err(ValidationError::new("uuid").with_message("must be a valid UUID".into()))
    }
}

fn validate_optional_uuid(value: &str) -> Result<(), ValidationError> {
    if Uuid::parse_str(value).is_ok() {
        Ok(())
    } else {
        Err(ValidationError::new("uuid").with_message("must be a valid UUID".into()))
    }
}

fn validate_role(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || value.parse::<AccountRole>().is_ok() {
        Ok(())
    } else {
        Err(ValidationError::new("role")
            .with_message("must be one of: merchant, customer, terminal, admin".into()))
    }
}

fn validate_operation_kind(value: &str) -> Result<(), ValidationError> {
    // Refunds go through their own endpoint with a `refund_of` reference.
    match value {
        "" | "credit" | "debit" => Ok(()),
        _ => Err(ValidationError::new("kind").with_message("must be credit or debit".into())),
    }
}

fn validate_idempotency_key(value: &str) -> Result<(), ValidationError> {
    if value.len() > 64 {
        return Err(ValidationError::new("idempotency_key")
            .with_message("must be at most 64 characters".into()));
    }
    if value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
    {
        Ok(())
    } else {
        Err(ValidationError::new("idempotency_key")
            .with_message("may only contain letters, digits, '.', '_' and '-'".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_request_valid() {
        let req = OperationRequest {
            account_id: Uuid::new_v4().to_string(),
            kind: "credit".to_string(),
            amount: 500,
            idempotency_key: "pos-7.batch-1".to_string(),
            note: Some("table 4".to_string()),
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_operation_request_collects_all_failures() {
        let req = OperationRequest {
            account_id: String::new(),
            kind: "credit".to_string(),
            amount: -5,
            idempotency_key: "k1".to_string(),
            note: None,
        };
        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("account_id"));
        assert!(fields.contains_key("amount"));
        assert!(!fields.contains_key("kind"));
    }

    #[test]
    fn test_operation_request_rejects_refund_kind() {
        let req = OperationRequest {
            account_id: Uuid::new_v4().to_string(),
            kind: "refund".to_string(),
            amount: 100,
            idempotency_key: "k1".to_string(),
            note: None,
        };
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("kind"));
    }

    #[test]
    fn test_idempotency_key_charset() {
        assert!(validate_idempotency_key("pos-7.batch_1").is_ok());
        assert!(validate_idempotency_key("spaces not ok").is_err());
        assert!(validate_idempotency_key(&"x".repeat(65)).is_err());
    }

    #[test]
    fn test_missing_fields_default_and_fail_validation() {
        let req: OperationRequest = serde_json::from_str("{}").unwrap();
        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("account_id"));
        assert!(fields.contains_key("kind"));
        assert!(fields.contains_key("amount"));
        assert!(fields.contains_key("idempotency_key"));
    }

    #[test]
    fn test_register_request_secret_length() {
        let req = RegisterAccountRequest {
            account_id: None,
            role: "terminal".to_string(),
            display_name: "Front counter".to_string(),
            secret: "short".to_string(),
        };
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("secret"));
    }

    #[test]
    fn test_register_request_bad_role() {
        let req = RegisterAccountRequest {
            account_id: None,
            role: "superuser".to_string(),
            display_name: "X".to_string(),
            secret: "long-enough-secret".to_string(),
        };
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("role"));
    }
}
