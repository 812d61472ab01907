//! Domain types shared between the gateway, core logic, and storage layer.

mod ledger;
mod role;

pub use ledger::{EntryStatus, OperationKind, RejectReason};
pub use role::{AccountRole, AccountStatus};
