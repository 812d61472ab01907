//! Repository pattern implementations for data access.

mod account;
mod ledger;

pub use account::{AccountError, AccountRepository, NewAccount};
pub use ledger::{LedgerError, LedgerRepository, OperationInput};
