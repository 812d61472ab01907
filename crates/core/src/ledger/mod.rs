//! Balance decision logic.
//!
//! The pure function at the heart of the ledger: given an account's state
//! and a requested operation, decide whether the balance mutation applies
//! or the entry is rejected. The storage layer runs this inside its
//! row-locked transaction so the decision and the write are atomic.

mod decision;

pub use decision::{DecisionError, LedgerDecision, decide};
