//! Initial schema: accounts and the append-only ledger.
//!
//! The database enforces the two hard invariants itself: balances can
//! never go negative and an `(account_id, idempotency_key)` pair maps to
//! at most one entry. Application bugs hit a constraint instead of
//! corrupting the ledger.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(INITIAL_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(
            r"
DROP TABLE IF EXISTS ledger_entries CASCADE;
DROP TABLE IF EXISTS accounts CASCADE;
DROP TYPE IF EXISTS reject_reason;
DROP TYPE IF EXISTS entry_status;
DROP TYPE IF EXISTS entry_kind;
DROP TYPE IF EXISTS account_status;
DROP TYPE IF EXISTS account_role;
",
        )
        .await?;
        Ok(())
    }
}

const INITIAL_SQL: &str = r"
CREATE TYPE account_role AS ENUM ('merchant', 'customer', 'terminal', 'admin');
CREATE TYPE account_status AS ENUM ('active', 'disabled');
CREATE TYPE entry_kind AS ENUM ('credit', 'debit', 'refund');
CREATE TYPE entry_status AS ENUM ('applied', 'rejected');
CREATE TYPE reject_reason AS ENUM ('insufficient_funds', 'account_disabled');

-- Accounts: credentials plus the current balance in minor units
CREATE TABLE accounts (
    id UUID PRIMARY KEY,
    role account_role NOT NULL,
    display_name VARCHAR(120) NOT NULL,
    credential_hash TEXT NOT NULL,
    balance BIGINT NOT NULL DEFAULT 0,
    status account_status NOT NULL DEFAULT 'active',
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_accounts_balance_non_negative CHECK (balance >= 0)
);

-- Append-only ledger: one row per attempted operation, applied or rejected
CREATE TABLE ledger_entries (
    id UUID PRIMARY KEY,
    account_id UUID NOT NULL REFERENCES accounts(id),
    idempotency_key VARCHAR(64) NOT NULL,
    kind entry_kind NOT NULL,
    amount BIGINT NOT NULL,
    resulting_balance BIGINT NOT NULL,
    status entry_status NOT NULL,
    reject_reason reject_reason,
    refund_of UUID REFERENCES ledger_entries(id),
    note TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_ledger_amount_positive CHECK (amount > 0),
    CONSTRAINT chk_ledger_rejected_has_reason
        CHECK ((status = 'rejected') = (reject_reason IS NOT NULL)),
    CONSTRAINT uq_ledger_account_idempotency UNIQUE (account_id, idempotency_key)
);

-- Index for an account's entry history (most recent first)
CREATE INDEX idx_ledger_account_created ON ledger_entries(account_id, created_at DESC);

-- Index for refund lookups against the original entry
CREATE INDEX idx_ledger_refund_of ON ledger_entries(refund_of) WHERE refund_of IS NOT NULL;
";
