//! Postgres enum mappings.
//!
//! These mirror the domain enums in `tillgate-shared`; the `From`
//! conversions keep the database representation out of the rest of the
//! codebase.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use tillgate_shared::types as domain;

/// Database `account_role` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "account_role")]
#[serde(rename_all = "lowercase")]
pub enum AccountRole {
    /// Merchant operator.
    #[sea_orm(string_value = "merchant")]
    Merchant,
    /// End customer.
    #[sea_orm(string_value = "customer")]
    Customer,
    /// Point-of-sale terminal.
    #[sea_orm(string_value = "terminal")]
    Terminal,
    /// Platform administrator.
    #[sea_orm(string_value = "admin")]
    Admin,
}

/// Database `account_status` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "account_status")]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    /// Account can authenticate and transact.
    #[sea_orm(string_value = "active")]
    Active,
    /// Account is locked out.
    #[sea_orm(string_value = "disabled")]
    Disabled,
}

/// Database `entry_kind` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "entry_kind")]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// Balance increase.
    #[sea_orm(string_value = "credit")]
    Credit,
    /// Balance decrease.
    #[sea_orm(string_value = "debit")]
    Debit,
    /// Balance decrease referencing an earlier applied entry.
    #[sea_orm(string_value = "refund")]
    Refund,
}

/// Database `entry_status` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "entry_status")]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    /// The balance mutation took effect.
    #[sea_orm(string_value = "applied")]
    Applied,
    /// The operation was recorded but the balance is unchanged.
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

/// Database `reject_reason` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "reject_reason")]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// The debit-like amount exceeded the balance.
    #[sea_orm(string_value = "insufficient_funds")]
    InsufficientFunds,
    /// The account is disabled.
    #[sea_orm(string_value = "account_disabled")]
    AccountDisabled,
}

impl From<domain::AccountRole> for AccountRole {
    fn from(role: domain::AccountRole) -> Self {
        match role {
            domain::AccountRole::Merchant => Self::Merchant,
            domain::AccountRole::Customer => Self::Customer,
            domain::AccountRole::Terminal => Self::Terminal,
            domain::AccountRole::Admin => Self::Admin,
        }
    }
}

impl From<AccountRole> for domain::AccountRole {
    fn from(role: AccountRole) -> Self {
        match role {
            AccountRole::Merchant => Self::Merchant,
            AccountRole::Customer => Self::Customer,
            AccountRole::Terminal => Self::Terminal,
            AccountRole::Admin => Self::Admin,
        }
    }
}

impl From<domain::AccountStatus> for AccountStatus {
    fn from(status: domain::AccountStatus) -> Self {
        match status {
            domain::AccountStatus::Active => Self::Active,
            domain::AccountStatus::Disabled => Self::Disabled,
        }
    }
}

impl From<AccountStatus> for domain::AccountStatus {
    fn from(status: AccountStatus) -> Self {
        match status {
            AccountStatus::Active => Self::Active,
            AccountStatus::Disabled => Self::Disabled,
        }
    }
}

impl From<domain::OperationKind> for EntryKind {
    fn from(kind: domain::OperationKind) -> Self {
        match kind {
            domain::OperationKind::Credit => Self::Credit,
            domain::OperationKind::Debit => Self::Debit,
            domain::OperationKind::Refund => Self::Refund,
        }
    }
}

impl From<EntryKind> for domain::OperationKind {
    fn from(kind: EntryKind) -> Self {
        match kind {
            EntryKind::Credit => Self::Credit,
            EntryKind::Debit => Self::Debit,
            EntryKind::Refund => Self::Refund,
        }
    }
}

impl From<EntryStatus> for domain::EntryStatus {
    fn from(status: EntryStatus) -> Self {
        match status {
            EntryStatus::Applied => Self::Applied,
            EntryStatus::Rejected => Self::Rejected,
        }
    }
}

impl From<domain::RejectReason> for RejectReason {
    fn from(reason: domain::RejectReason) -> Self {
        match reason {
            domain::RejectReason::InsufficientFunds => Self::InsufficientFunds,
            domain::RejectReason::AccountDisabled => Self::AccountDisabled,
        }
    }
}

impl From<RejectReason> for domain::RejectReason {
    fn from(reason: RejectReason) -> Self {
        match reason {
            RejectReason::InsufficientFunds => Self::InsufficientFunds,
            RejectReason::AccountDisabled => Self::AccountDisabled,
        }
    }
}
