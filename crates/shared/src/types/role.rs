//! Account roles and statuses.

use serde::{Deserialize, Serialize};

/// Identity role held by an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountRole {
    /// A merchant operating one or more terminals.
    Merchant,
    /// A customer holding a wallet balance.
    Customer,
    /// A POS terminal identity.
    Terminal,
    /// Platform administrator.
    Admin,
}

impl std::fmt::Display for AccountRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Merchant => write!(f, "merchant"),
            Self::Customer => write!(f, "customer"),
            Self::Terminal => write!(f, "terminal"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

impl std::str::FromStr for AccountRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "merchant" => Ok(Self::Merchant),
            "customer" => Ok(Self::Customer),
            "terminal" => Ok(Self::Terminal),
            "admin" => Ok(Self::Admin),
            _ => Err(format!("unknown role: {s}")),
        }
    }
}

/// Whether an account may authenticate and transact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    /// Account is active.
    Active,
    /// Account is disabled; all operations are rejected.
    Disabled,
}

impl AccountStatus {
    /// Returns true if the account may transact.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_role_round_trip() {
        for role in [
            AccountRole::Merchant,
            AccountRole::Customer,
            AccountRole::Terminal,
            AccountRole::Admin,
        ] {
            assert_eq!(AccountRole::from_str(&role.to_string()).unwrap(), role);
        }
        assert!(AccountRole::from_str("owner").is_err());
        assert!(AccountRole::from_str("").is_err());
    }

    #[test]
    fn test_status_is_active() {
        assert!(AccountStatus::Active.is_active());
        assert!(!AccountStatus::Disabled.is_active());
    }
}
