//! Structural validation against declared request shapes.
//!
//! Collects every violation into a stable, sorted field list so a client
//! can fix all problems in one round trip.

use tillgate_shared::{FieldError, GatewayError};
use validator::Validate;

/// Validates a payload, turning violations into `ValidationFailed`.
///
/// # Errors
///
/// Returns `GatewayError::ValidationFailed` listing every offending field.
pub fn check_payload<T: Validate>(payload: &T) -> Result<(), GatewayError> {
    let Err(errors) = payload.validate() else {
        return Ok(());
    };

    let mut fields = Vec::new();
    for (field, violations) in errors.field_errors() {
        for violation in violations {
            let message = violation
                .message
                .as_ref()
                .map_or_else(|| violation.code.to_string(), ToString::to_string);
            fields.push(FieldError::new(field.to_string(), message));
        }
    }
    fields.sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.message.cmp(&b.message)));

    Err(GatewayError::ValidationFailed(fields))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tillgate_shared::auth::OperationRequest;

    #[test]
    fn test_valid_payload_passes() {
        let req = OperationRequest {
            account_id: "11111111-2222-4333-8444-555555555555".to_string(),
            kind: "debit".to_string(),
            amount: 250,
            idempotency_key: "pos-1.receipt-9".to_string(),
            note: None,
        };
        assert!(check_payload(&req).is_ok());
    }

    #[test]
    fn test_all_failing_fields_enumerated() {
        let req = OperationRequest {
            account_id: String::new(),
            kind: String::new(),
            amount: -5,
            idempotency_key: String::new(),
            note: None,
        };

        let Err(GatewayError::ValidationFailed(fields)) = check_payload(&req) else {
            panic!("expected ValidationFailed");
        };

        let names: Vec<&str> = fields.iter().map(|f| f.field.as_str()).collect();
        assert!(names.contains(&"account_id"));
        assert!(names.contains(&"amount"));
        assert!(names.contains(&"kind"));
        assert!(names.contains(&"idempotency_key"));

        // Sorted for a stable response shape.
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
    }

    #[test]
    fn test_messages_are_specific() {
        let req = OperationRequest {
            account_id: String::new(),
            kind: "credit".to_string(),
            amount: -5,
            idempotency_key: "k1".to_string(),
            note: None,
        };

        let Err(GatewayError::ValidationFailed(fields)) = check_payload(&req) else {
            panic!("expected ValidationFailed");
        };

        assert!(
            fields
                .iter()
                .any(|f| f.field == "account_id" && f.message == "account_id required")
        );
        assert!(
            fields
                .iter()
                .any(|f| f.field == "amount" && f.message == "amount must be positive")
        );
    }
}
