//! `SeaORM` Entity for the append-only ledger_entries table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{EntryKind, EntryStatus, RejectReason};

/// Rows are inserted once and never updated or deleted.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "ledger_entries")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub account_id: Uuid,
    pub idempotency_key: String,
    pub kind: EntryKind,
    /// Amount in minor units, always positive.
    pub amount: i64,
    /// Account balance after this entry (unchanged for rejected entries).
    pub resulting_balance: i64,
    pub status: EntryStatus,
    pub reject_reason: Option<RejectReason>,
    /// The original applied entry, for refunds.
    pub refund_of: Option<Uuid>,
    pub note: Option<String>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::accounts::Entity",
        from = "Column::AccountId",
        to = "super::accounts::Column::Id"
    )]
    Accounts,
}

impl Related<super::accounts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Accounts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for tillgate_shared::auth::LedgerEntryView {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            account_id: model.account_id,
            idempotency_key: model.idempotency_key,
            kind: model.kind.into(),
            amount: model.amount,
            resulting_balance: model.resulting_balance,
            status: model.status.into(),
            reject_reason: model.reject_reason.map(Into::into),
            refund_of: model.refund_of,
            created_at: model.created_at.to_utc(),
        }
    }
}
