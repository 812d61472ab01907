//! `SeaORM` Entity for accounts table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{AccountRole, AccountStatus};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub role: AccountRole,
    pub display_name: String,
    pub credential_hash: String,
    /// Balance in minor units; mutated only inside ledger transactions.
    pub balance: i64,
    pub status: AccountStatus,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::ledger_entries::Entity")]
    LedgerEntries,
}

impl Related<super::ledger_entries::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LedgerEntries.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for tillgate_shared::auth::AccountView {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            role: model.role.into(),
            display_name: model.display_name,
            balance: model.balance,
            status: model.status.into(),
            created_at: model.created_at.to_utc(),
        }
    }
}
