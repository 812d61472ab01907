//! Account repository for database operations.

use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, Set, SqlErr};
use thiserror::Error;
use tillgate_shared::types::{AccountRole, AccountStatus};
use uuid::Uuid;

use crate::entities::accounts;

/// Errors from account persistence.
#[derive(Debug, Error)]
pub enum AccountError {
    /// An account with the requested id already exists.
    #[error("account already exists")]
    AlreadyExists,

    /// Underlying database failure.
    #[error("database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for registering an account.
///
/// The caller hashes the secret before it reaches this layer; plaintext
/// credentials never cross the repository boundary.
#[derive(Debug, Clone)]
pub struct NewAccount {
    /// Explicit id, or `None` to generate one.
    pub id: Option<Uuid>,
    /// Role the account acts as.
    pub role: AccountRole,
    /// Human-readable name (already sanitized).
    pub display_name: String,
    /// Argon2id PHC string.
    pub credential_hash: String,
}

/// Account repository for credential and status operations.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    db: DatabaseConnection,
}

impl AccountRepository {
    /// Creates a new account repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Registers an account with a zero balance.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::AlreadyExists` when the id is taken, or a
    /// database error if the insert fails.
    pub async fn create(&self, input: NewAccount) -> Result<accounts::Model, AccountError> {
        let now = chrono::Utc::now().into();

        let account = accounts::ActiveModel {
            id: Set(input.id.unwrap_or_else(Uuid::new_v4)),
            role: Set(input.role.into()),
            display_name: Set(input.display_name),
            credential_hash: Set(input.credential_hash),
            balance: Set(0),
            status: Set(crate::entities::sea_orm_active_enums::AccountStatus::Active),
            created_at: Set(now),
            updated_at: Set(now),
        };

        match account.insert(&self.db).await {
            Ok(model) => Ok(model),
            Err(err) => {
                if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                    Err(AccountError::AlreadyExists)
                } else {
                    Err(err.into())
                }
            }
        }
    }

    /// Finds an account by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<accounts::Model>, DbErr> {
        accounts::Entity::find_by_id(id).one(&self.db).await
    }

    /// Sets an account's status.
    ///
    /// Disabling takes effect on the next ledger operation; already-issued
    /// tokens are revoked separately.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn set_status(&self, id: Uuid, status: AccountStatus) -> Result<(), DbErr> {
        accounts::ActiveModel {
            id: Set(id),
            status: Set(status.into()),
            updated_at: Set(chrono::Utc::now().into()),
            ..Default::default()
        }
        .update(&self.db)
        .await?;

        Ok(())
    }
}
