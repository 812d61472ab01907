//! `SeaORM` entity definitions.

pub mod accounts;
pub mod ledger_entries;
pub mod sea_orm_active_enums;
