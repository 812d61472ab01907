//! Ledger repository: idempotent, row-locked balance operations.
//!
//! All balance mutations flow through `apply_operation`. The account row
//! is locked with `SELECT ... FOR UPDATE` for the duration of the decision
//! and the write, so concurrent operations on one account serialize while
//! other accounts proceed in parallel. Idempotent replays are answered
//! from the existing entry without touching the balance.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QuerySelect, Set, SqlErr, TransactionTrait,
};
use thiserror::Error;
use tillgate_core::ledger::{DecisionError, LedgerDecision, decide};
use tillgate_shared::types::{EntryStatus, OperationKind};
use tillgate_shared::{FieldError, GatewayError};
use uuid::Uuid;

use crate::entities::{accounts, ledger_entries, sea_orm_active_enums};

/// Errors from ledger persistence.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The target account does not exist.
    #[error("account not found")]
    AccountNotFound,

    /// A refund referenced an entry that does not exist on the account.
    #[error("refunded entry not found")]
    RefundTargetNotFound,

    /// A refund referenced an entry that never applied.
    #[error("refunded entry is not refundable")]
    RefundTargetNotApplied,

    /// A refund asked for more than the original entry's amount.
    #[error("refund exceeds the original amount")]
    RefundExceedsOriginal,

    /// The decision function rejected the inputs outright.
    #[error(transparent)]
    Decision(#[from] DecisionError),

    /// Underlying database failure.
    #[error("database error: {0}")]
    Database(#[from] DbErr),
}

impl From<LedgerError> for GatewayError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::AccountNotFound => Self::ValidationFailed(vec![FieldError::new(
                "account_id".to_string(),
                "unknown account".to_string(),
            )]),
            LedgerError::RefundTargetNotFound => Self::ValidationFailed(vec![FieldError::new(
                "entry_id".to_string(),
                "unknown ledger entry".to_string(),
            )]),
            LedgerError::RefundTargetNotApplied => Self::ValidationFailed(vec![FieldError::new(
                "entry_id".to_string(),
                "entry is not refundable".to_string(),
            )]),
            LedgerError::RefundExceedsOriginal => Self::ValidationFailed(vec![FieldError::new(
                "amount".to_string(),
                "refund exceeds the original amount".to_string(),
            )]),
            LedgerError::Decision(decision) => Self::Internal(decision.to_string()),
            LedgerError::Database(db) => match db {
                DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => Self::StorageUnavailable,
                other => Self::Internal(other.to_string()),
            },
        }
    }
}

/// A balance-affecting operation, validated upstream.
#[derive(Debug, Clone)]
pub struct OperationInput {
    /// Target account.
    pub account_id: Uuid,
    /// Credit, debit, or refund.
    pub kind: OperationKind,
    /// Amount in minor units, strictly positive.
    pub amount: i64,
    /// Client-chosen replay key, unique per account.
    pub idempotency_key: String,
    /// The original entry, required for refunds.
    pub refund_of: Option<Uuid>,
    /// Optional free-text note (already sanitized).
    pub note: Option<String>,
}

/// Ledger repository owning all balance mutations.
#[derive(Debug, Clone)]
pub struct LedgerRepository {
    db: DatabaseConnection,
}

impl LedgerRepository {
    /// Creates a new ledger repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Applies a balance operation exactly once.
    ///
    /// A replay of an `(account_id, idempotency_key)` pair returns the
    /// recorded entry unchanged, whatever its outcome and whatever the
    /// rest of the payload says. Fresh operations lock the account row,
    /// run the balance decision, and insert an applied or rejected entry
    /// atomically with the balance update.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError` for unknown accounts, bad refund references,
    /// or database failures. Insufficient funds and disabled accounts are
    /// not errors here; they come back as rejected entries.
    pub async fn apply_operation(
        &self,
        input: OperationInput,
    ) -> Result<ledger_entries::Model, LedgerError> {
        // Replay fast path, no lock taken.
        if let Some(existing) = self
            .find_by_key(input.account_id, &input.idempotency_key)
            .await?
        {
            tracing::info!(
                account_id = %input.account_id,
                entry_id = %existing.id,
                "idempotent replay answered from existing entry"
            );
            return Ok(existing);
        }

        if input.kind == OperationKind::Refund {
            self.check_refund_target(&input).await?;
        }

        let txn = self.db.begin().await?;

        let Some(account) = accounts::Entity::find_by_id(input.account_id)
            .lock_exclusive()
            .one(&txn)
            .await?
        else {
            return Err(LedgerError::AccountNotFound);
        };

        let decision = decide(
            account.status.into(),
            account.balance,
            input.kind,
            input.amount,
        )?;

        let (status, reject_reason, resulting_balance) = match decision {
            LedgerDecision::Apply { new_balance } => (
                sea_orm_active_enums::EntryStatus::Applied,
                None,
                new_balance,
            ),
            LedgerDecision::Reject { reason } => (
                sea_orm_active_enums::EntryStatus::Rejected,
                Some(reason.into()),
                account.balance,
            ),
        };

        let entry = ledger_entries::ActiveModel {
            id: Set(Uuid::new_v4()),
            account_id: Set(input.account_id),
            idempotency_key: Set(input.idempotency_key.clone()),
            kind: Set(input.kind.into()),
            amount: Set(input.amount),
            resulting_balance: Set(resulting_balance),
            status: Set(status),
            reject_reason: Set(reject_reason),
            refund_of: Set(input.refund_of),
            note: Set(input.note.clone()),
            created_at: Set(chrono::Utc::now().into()),
        };

        let inserted = match entry.insert(&txn).await {
            Ok(model) => model,
            Err(err) => {
                // Lost the unique-index race to a concurrent duplicate;
                // the winner's entry is the authoritative outcome.
                if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                    txn.rollback().await?;
                    return self
                        .find_by_key(input.account_id, &input.idempotency_key)
                        .await?
                        .ok_or(LedgerError::Database(err));
                }
                return Err(err.into());
            }
        };

        if inserted.status == sea_orm_active_enums::EntryStatus::Applied {
            let mut active: accounts::ActiveModel = account.into();
            active.balance = Set(resulting_balance);
            active.updated_at = Set(chrono::Utc::now().into());
            active.update(&txn).await?;
        }

        txn.commit().await?;

        tracing::info!(
            account_id = %input.account_id,
            entry_id = %inserted.id,
            kind = %input.kind,
            status = ?EntryStatus::from(inserted.status),
            "ledger operation recorded"
        );

        Ok(inserted)
    }

    /// Reads an account's balance without taking a lock.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get_balance(&self, account_id: Uuid) -> Result<Option<i64>, DbErr> {
        Ok(accounts::Entity::find_by_id(account_id)
            .one(&self.db)
            .await?
            .map(|a| a.balance))
    }

    /// Lists an account's entries, most recent first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn entries_for_account(
        &self,
        account_id: Uuid,
    ) -> Result<Vec<ledger_entries::Model>, DbErr> {
        use sea_orm::QueryOrder;

        ledger_entries::Entity::find()
            .filter(ledger_entries::Column::AccountId.eq(account_id))
            .order_by_desc(ledger_entries::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    async fn find_by_key(
        &self,
        account_id: Uuid,
        idempotency_key: &str,
    ) -> Result<Option<ledger_entries::Model>, DbErr> {
        ledger_entries::Entity::find()
            .filter(ledger_entries::Column::AccountId.eq(account_id))
            .filter(ledger_entries::Column::IdempotencyKey.eq(idempotency_key))
            .one(&self.db)
            .await
    }

    async fn check_refund_target(&self, input: &OperationInput) -> Result<(), LedgerError> {
        let target_id = input.refund_of.ok_or(LedgerError::RefundTargetNotFound)?;

        let target = ledger_entries::Entity::find_by_id(target_id)
            .one(&self.db)
            .await?
            .ok_or(LedgerError::RefundTargetNotFound)?;

        // Refunds only reference applied entries on the same account.
        if target.account_id != input.account_id {
            return Err(LedgerError::RefundTargetNotFound);
        }
        if target.status != sea_orm_active_enums::EntryStatus::Applied {
            return Err(LedgerError::RefundTargetNotApplied);
        }
        if input.amount > target.amount {
            return Err(LedgerError::RefundExceedsOriginal);
        }

        Ok(())
    }
}
