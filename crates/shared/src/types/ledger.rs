//! Ledger operation kinds and entry statuses.
//!
//! Amounts everywhere in the system are integer minor units (cents).
//! Floating point never touches a balance.

use serde::{Deserialize, Serialize};

/// Balance-affecting operation kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    /// Adds to the balance (top-up).
    Credit,
    /// Subtracts from the balance (charge).
    Debit,
    /// Subtracts from the balance, referencing the original entry.
    Refund,
}

impl OperationKind {
    /// Returns true if this kind subtracts from the balance.
    #[must_use]
    pub const fn is_debit_like(self) -> bool {
        matches!(self, Self::Debit | Self::Refund)
    }
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Credit => write!(f, "credit"),
            Self::Debit => write!(f, "debit"),
            Self::Refund => write!(f, "refund"),
        }
    }
}

impl std::str::FromStr for OperationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "credit" => Ok(Self::Credit),
            "debit" => Ok(Self::Debit),
            "refund" => Ok(Self::Refund),
            _ => Err(format!("unknown operation kind: {s}")),
        }
    }
}

/// Terminal state of a ledger entry.
///
/// An entry is only ever `pending` transiently inside the storage
/// transaction; once committed it is `applied` or `rejected` forever.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    /// The balance mutation was committed.
    Applied,
    /// The operation was recorded but no balance change occurred.
    Rejected,
}

/// Why a ledger entry was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// The debit would have driven the balance negative.
    InsufficientFunds,
    /// The account is disabled.
    AccountDisabled,
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InsufficientFunds => write!(f, "insufficient_funds"),
            Self::AccountDisabled => write!(f, "account_disabled"),
        }
    }
}

impl std::str::FromStr for RejectReason {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "insufficient_funds" => Ok(Self::InsufficientFunds),
            "account_disabled" => Ok(Self::AccountDisabled),
            _ => Err(format!("unknown reject reason: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_kind_debit_like() {
        assert!(!OperationKind::Credit.is_debit_like());
        assert!(OperationKind::Debit.is_debit_like());
        assert!(OperationKind::Refund.is_debit_like());
    }

    #[test]
    fn test_kind_round_trip() {
        for kind in [
            OperationKind::Credit,
            OperationKind::Debit,
            OperationKind::Refund,
        ] {
            assert_eq!(OperationKind::from_str(&kind.to_string()).unwrap(), kind);
        }
        assert!(OperationKind::from_str("chargeback").is_err());
    }

    #[test]
    fn test_reject_reason_round_trip() {
        for reason in [RejectReason::InsufficientFunds, RejectReason::AccountDisabled] {
            assert_eq!(RejectReason::from_str(&reason.to_string()).unwrap(), reason);
        }
    }
}
