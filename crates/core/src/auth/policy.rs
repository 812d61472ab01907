//! Role permission policy.
//!
//! A valid token only proves identity; whether the identity may perform the
//! requested operation is decided here. The gateway rejects with Forbidden
//! when a predicate returns false.

use tillgate_shared::types::{AccountRole, OperationKind};

/// Permission predicates for account roles.
pub trait RolePolicy {
    /// Returns true if this role may post the given operation kind.
    fn can_post(&self, kind: OperationKind) -> bool;

    /// Returns true if this role may register new accounts.
    fn can_register_accounts(&self) -> bool;

    /// Returns true if this role may read the balance of the given account,
    /// where `own` indicates the account is the caller's own.
    fn can_view_balance(&self, own: bool) -> bool;
}

impl RolePolicy for AccountRole {
    fn can_post(&self, kind: OperationKind) -> bool {
        match self {
            Self::Admin => true,
            Self::Terminal => matches!(kind, OperationKind::Credit | OperationKind::Debit),
            Self::Merchant => matches!(kind, OperationKind::Refund),
            Self::Customer => false,
        }
    }

    fn can_register_accounts(&self) -> bool {
        matches!(self, Self::Admin)
    }

    fn can_view_balance(&self, own: bool) -> bool {
        match self {
            Self::Admin => true,
            Self::Merchant | Self::Customer | Self::Terminal => own,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_posts_credits_and_debits() {
        assert!(AccountRole::Terminal.can_post(OperationKind::Credit));
        assert!(AccountRole::Terminal.can_post(OperationKind::Debit));
        assert!(!AccountRole::Terminal.can_post(OperationKind::Refund));
    }

    #[test]
    fn test_merchant_posts_refunds_only() {
        assert!(!AccountRole::Merchant.can_post(OperationKind::Credit));
        assert!(!AccountRole::Merchant.can_post(OperationKind::Debit));
        assert!(AccountRole::Merchant.can_post(OperationKind::Refund));
    }

    #[test]
    fn test_customer_posts_nothing() {
        assert!(!AccountRole::Customer.can_post(OperationKind::Credit));
        assert!(!AccountRole::Customer.can_post(OperationKind::Debit));
        assert!(!AccountRole::Customer.can_post(OperationKind::Refund));
    }

    #[test]
    fn test_admin_posts_everything() {
        assert!(AccountRole::Admin.can_post(OperationKind::Credit));
        assert!(AccountRole::Admin.can_post(OperationKind::Debit));
        assert!(AccountRole::Admin.can_post(OperationKind::Refund));
    }

    #[test]
    fn test_account_registration_is_admin_only() {
        assert!(AccountRole::Admin.can_register_accounts());
        assert!(!AccountRole::Merchant.can_register_accounts());
        assert!(!AccountRole::Terminal.can_register_accounts());
        assert!(!AccountRole::Customer.can_register_accounts());
    }

    #[test]
    fn test_balance_visibility() {
        assert!(AccountRole::Customer.can_view_balance(true));
        assert!(!AccountRole::Customer.can_view_balance(false));
        assert!(AccountRole::Admin.can_view_balance(false));
    }
}
