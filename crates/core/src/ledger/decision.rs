//! The balance mutation decision.

use thiserror::Error;
use tillgate_shared::types::{AccountStatus, OperationKind, RejectReason};

/// Outcome of deciding a balance-affecting operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerDecision {
    /// The operation applies; the balance becomes `new_balance`.
    Apply {
        /// Balance after the mutation, in minor units.
        new_balance: i64,
    },
    /// The operation is recorded as rejected; the balance is unchanged.
    Reject {
        /// Why the operation was rejected.
        reason: RejectReason,
    },
}

/// Inputs the decision cannot work with at all.
///
/// These are caller bugs, not business outcomes: validation upstream
/// guarantees positive amounts, and i64 minor units do not overflow for
/// any realistic balance.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecisionError {
    /// The amount was zero or negative.
    #[error("amount must be positive, got {0}")]
    NonPositiveAmount(i64),

    /// The credit would overflow the balance representation.
    #[error("balance overflow")]
    BalanceOverflow,
}

/// Decides a balance mutation against a point-in-time account state.
///
/// Credits add to the balance; debits and refunds subtract. A subtraction
/// that would drive the balance negative rejects with
/// `RejectReason::InsufficientFunds`; any operation against a disabled
/// account rejects with `RejectReason::AccountDisabled`.
///
/// # Errors
///
/// Returns `DecisionError` for non-positive amounts or balance overflow.
pub fn decide(
    status: AccountStatus,
    balance: i64,
    kind: OperationKind,
    amount: i64,
) -> Result<LedgerDecision, DecisionError> {
    if amount <= 0 {
        return Err(DecisionError::NonPositiveAmount(amount));
    }

    if !status.is_active() {
        return Ok(LedgerDecision::Reject {
            reason: RejectReason::AccountDisabled,
        });
    }

    if kind.is_debit_like() {
        if amount > balance {
            return Ok(LedgerDecision::Reject {
                reason: RejectReason::InsufficientFunds,
            });
        }
        Ok(LedgerDecision::Apply {
            new_balance: balance - amount,
        })
    } else {
        let new_balance = balance
            .checked_add(amount)
            .ok_or(DecisionError::BalanceOverflow)?;
        Ok(LedgerDecision::Apply { new_balance })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_credit_applies() {
        let decision = decide(AccountStatus::Active, 1000, OperationKind::Credit, 500).unwrap();
        assert_eq!(decision, LedgerDecision::Apply { new_balance: 1500 });
    }

    #[test]
    fn test_debit_applies() {
        let decision = decide(AccountStatus::Active, 1000, OperationKind::Debit, 400).unwrap();
        assert_eq!(decision, LedgerDecision::Apply { new_balance: 600 });
    }

    #[test]
    fn test_debit_to_exactly_zero() {
        let decision = decide(AccountStatus::Active, 1000, OperationKind::Debit, 1000).unwrap();
        assert_eq!(decision, LedgerDecision::Apply { new_balance: 0 });
    }

    #[test]
    fn test_overdraft_rejects() {
        let decision = decide(AccountStatus::Active, 1000, OperationKind::Debit, 1500).unwrap();
        assert_eq!(
            decision,
            LedgerDecision::Reject {
                reason: RejectReason::InsufficientFunds
            }
        );
    }

    #[test]
    fn test_refund_subtracts_like_a_debit() {
        let decision = decide(AccountStatus::Active, 800, OperationKind::Refund, 300).unwrap();
        assert_eq!(decision, LedgerDecision::Apply { new_balance: 500 });

        let decision = decide(AccountStatus::Active, 200, OperationKind::Refund, 300).unwrap();
        assert_eq!(
            decision,
            LedgerDecision::Reject {
                reason: RejectReason::InsufficientFunds
            }
        );
    }

    #[rstest]
    #[case(OperationKind::Credit)]
    #[case(OperationKind::Debit)]
    #[case(OperationKind::Refund)]
    fn test_disabled_account_rejects_everything(#[case] kind: OperationKind) {
        let decision = decide(AccountStatus::Disabled, 1000, kind, 100).unwrap();
        assert_eq!(
            decision,
            LedgerDecision::Reject {
                reason: RejectReason::AccountDisabled
            }
        );
    }

    #[rstest]
    #[case(0)]
    #[case(-5)]
    fn test_non_positive_amount_is_a_caller_bug(#[case] amount: i64) {
        let result = decide(AccountStatus::Active, 1000, OperationKind::Credit, amount);
        assert_eq!(result, Err(DecisionError::NonPositiveAmount(amount)));
    }

    #[test]
    fn test_credit_overflow() {
        let result = decide(AccountStatus::Active, i64::MAX, OperationKind::Credit, 1);
        assert_eq!(result, Err(DecisionError::BalanceOverflow));
    }
}
