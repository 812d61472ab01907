//! The request pipeline tying guard, tokens, and the ledger together.
//!
//! Every operation runs the same stages in the same order: rate limit,
//! sanitize, validate, then token verification and role checks, and only
//! then the ledger. A rejection at any stage short-circuits; the ledger is
//! never touched by a request that failed the guard.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use tillgate_core::auth::{DUMMY_HASH, RolePolicy, hash_secret, verify_secret};
use tillgate_core::guard::{RateLimiter, Sanitize, check_payload};
use tillgate_db::entities::ledger_entries;
use tillgate_db::repositories::{
    AccountError, AccountRepository, LedgerError, LedgerRepository, NewAccount, OperationInput,
};
use tillgate_shared::auth::{
    AccountView, BalanceResponse, LoginRequest, LoginResponse, OperationRequest,
    OperationResponse, RefundRequest, RegisterAccountRequest,
};
use tillgate_shared::types::{AccountRole, AccountStatus, EntryStatus, OperationKind, RejectReason};
use tillgate_shared::{Claims, FieldError, GatewayError, GatewayResult, TokenService};

use crate::AppState;

/// Per-request orchestration of the gateway pipeline.
pub struct TransactionGateway {
    accounts: AccountRepository,
    ledger: LedgerRepository,
    tokens: Arc<TokenService>,
    limiter: Arc<RateLimiter>,
}

impl TransactionGateway {
    /// Builds a gateway over the shared application state.
    #[must_use]
    pub fn new(state: &AppState) -> Self {
        Self {
            accounts: AccountRepository::new((*state.db).clone()),
            ledger: LedgerRepository::new((*state.db).clone()),
            tokens: Arc::clone(&state.tokens),
            limiter: Arc::clone(&state.limiter),
        }
    }

    /// Authenticates an account and issues a session token.
    ///
    /// Unknown accounts and wrong secrets produce the identical
    /// `AuthenticationFailed`; a dummy verification runs on the unknown
    /// path so the two cost the same.
    ///
    /// # Errors
    ///
    /// Returns a `GatewayError` for any failed pipeline stage.
    pub async fn authenticate(
        &self,
        client_key: &str,
        payload: LoginRequest,
    ) -> GatewayResult<LoginResponse> {
        self.check_rate(client_key)?;
        check_payload(&payload)?;

        let account_id = parse_uuid_field(&payload.account_id, "account_id")?;

        let account = self
            .accounts
            .find_by_id(account_id)
            .await
            .map_err(map_db_err)?;

        let Some(account) = account else {
            let _ = verify_secret(&payload.secret, DUMMY_HASH);
            info!("login attempt for unknown account");
            return Err(GatewayError::AuthenticationFailed);
        };

        if !verify_secret(&payload.secret, &account.credential_hash) {
            info!(account_id = %account.id, "login attempt with wrong secret");
            return Err(GatewayError::AuthenticationFailed);
        }

        let status = AccountStatus::from(account.status);
        if !status.is_active() {
            warn!(account_id = %account.id, "login attempt for disabled account");
            return Err(GatewayError::AccountDisabled);
        }

        let role = AccountRole::from(account.role);
        let issued = self.tokens.issue(account.id, role)?;
        info!(account_id = %account.id, role = %role, "session issued");

        Ok(LoginResponse {
            account_id: account.id,
            role,
            access_token: issued.token,
            token_type: "Bearer",
            expires_in: issued.expires_in,
        })
    }

    /// Revokes the presented session token.
    ///
    /// # Errors
    ///
    /// Returns a `GatewayError` when rate-limited or when the token does
    /// not verify.
    pub fn logout(&self, client_key: &str, token: Option<&str>) -> GatewayResult<()> {
        self.check_rate(client_key)?;
        let claims = self.authorize(token)?;

        self.tokens.revoke(claims.jti);
        info!(account_id = %claims.account_id(), "session revoked");
        Ok(())
    }

    /// Registers a new account. Admin only.
    ///
    /// # Errors
    ///
    /// Returns a `GatewayError` for any failed pipeline stage, including
    /// `Forbidden` for non-admin callers.
    pub async fn register_account(
        &self,
        client_key: &str,
        token: Option<&str>,
        mut payload: RegisterAccountRequest,
    ) -> GatewayResult<AccountView> {
        self.check_rate(client_key)?;
        payload.sanitize();
        check_payload(&payload)?;

        let claims = self.authorize(token)?;
        let actor_role = claims.account_role()?;
        if !actor_role.can_register_accounts() {
            return Err(GatewayError::Forbidden(
                "only admins can register accounts".to_string(),
            ));
        }

        let id = match payload.account_id.as_deref() {
            None | Some("") => None,
            Some(raw) => Some(parse_uuid_field(raw, "account_id")?),
        };
        let role: AccountRole = payload
            .role
            .parse()
            .map_err(|_| validation_error("role", "unrecognized role"))?;

        let credential_hash =
            hash_secret(&payload.secret).map_err(|e| GatewayError::Internal(e.to_string()))?;

        let account = self
            .accounts
            .create(NewAccount {
                id,
                role,
                display_name: payload.display_name.clone(),
                credential_hash,
            })
            .await
            .map_err(|e| match e {
                AccountError::AlreadyExists => {
                    validation_error("account_id", "account already exists")
                }
                AccountError::Database(db) => map_db_err(db),
            })?;

        info!(account_id = %account.id, role = %role, "account registered");
        Ok(account.into())
    }

    /// Applies a credit or debit to an account.
    ///
    /// # Errors
    ///
    /// Returns a `GatewayError` for any failed pipeline stage;
    /// `InsufficientFunds` and `AccountDisabled` surface rejected entries.
    pub async fn submit_operation(
        &self,
        client_key: &str,
        token: Option<&str>,
        mut payload: OperationRequest,
    ) -> GatewayResult<OperationResponse> {
        self.check_rate(client_key)?;
        payload.sanitize();
        check_payload(&payload)?;

        let claims = self.authorize(token)?;
        let actor_role = claims.account_role()?;
        let kind: OperationKind = payload
            .kind
            .parse()
            .map_err(|_| validation_error("kind", "kind must be credit or debit"))?;
        if !actor_role.can_post(kind) {
            return Err(GatewayError::Forbidden(format!(
                "role {actor_role} may not post {kind} operations"
            )));
        }

        let account_id = parse_uuid_field(&payload.account_id, "account_id")?;
        let entry = self
            .ledger
            .apply_operation(OperationInput {
                account_id,
                kind,
                amount: payload.amount,
                idempotency_key: payload.idempotency_key.clone(),
                refund_of: None,
                note: payload.note.clone(),
            })
            .await?;

        entry_outcome(entry)
    }

    /// Applies a refund against a previously applied entry.
    ///
    /// # Errors
    ///
    /// Returns a `GatewayError` for any failed pipeline stage or a bad
    /// refund reference.
    pub async fn refund(
        &self,
        client_key: &str,
        token: Option<&str>,
        mut payload: RefundRequest,
    ) -> GatewayResult<OperationResponse> {
        self.check_rate(client_key)?;
        payload.sanitize();
        check_payload(&payload)?;

        let claims = self.authorize(token)?;
        let actor_role = claims.account_role()?;
        if !actor_role.can_post(OperationKind::Refund) {
            return Err(GatewayError::Forbidden(format!(
                "role {actor_role} may not post refunds"
            )));
        }

        let account_id = parse_uuid_field(&payload.account_id, "account_id")?;
        let entry_id = parse_uuid_field(&payload.entry_id, "entry_id")?;
        let entry = self
            .ledger
            .apply_operation(OperationInput {
                account_id,
                kind: OperationKind::Refund,
                amount: payload.amount,
                idempotency_key: payload.idempotency_key.clone(),
                refund_of: Some(entry_id),
                note: payload.note.clone(),
            })
            .await?;

        entry_outcome(entry)
    }

    /// Reads an account balance.
    ///
    /// Accounts see their own balance; admins see any.
    ///
    /// # Errors
    ///
    /// Returns a `GatewayError` for any failed pipeline stage.
    pub async fn balance(
        &self,
        client_key: &str,
        token: Option<&str>,
        account_id: Uuid,
    ) -> GatewayResult<BalanceResponse> {
        self.check_rate(client_key)?;
        let claims = self.authorize(token)?;
        let actor_role = claims.account_role()?;
        let own = claims.account_id() == account_id;
        if !actor_role.can_view_balance(own) {
            return Err(GatewayError::Forbidden(
                "balance is visible to the account owner or an admin".to_string(),
            ));
        }

        let balance = self
            .ledger
            .get_balance(account_id)
            .await
            .map_err(map_db_err)?
            .ok_or_else(|| validation_error("account_id", "unknown account"))?;

        Ok(BalanceResponse {
            account_id,
            balance,
            as_of: Utc::now(),
        })
    }

    fn check_rate(&self, client_key: &str) -> GatewayResult<()> {
        if self.limiter.allow(client_key) {
            Ok(())
        } else {
            warn!(client = %client_key, "rate limit exceeded");
            Err(GatewayError::RateLimited)
        }
    }

    fn authorize(&self, token: Option<&str>) -> GatewayResult<Claims> {
        let token = token.ok_or(GatewayError::TokenInvalid)?;
        Ok(self.tokens.verify(token)?)
    }
}

/// Maps a recorded entry to the client-facing outcome.
///
/// Applied entries (fresh or replayed) become a success response; rejected
/// entries surface as the matching gateway error, again identically on
/// replay.
fn entry_outcome(entry: ledger_entries::Model) -> GatewayResult<OperationResponse> {
    let view: tillgate_shared::auth::LedgerEntryView = entry.into();
    match view.status {
        EntryStatus::Applied => Ok(OperationResponse {
            balance: view.resulting_balance,
            entry: view,
        }),
        EntryStatus::Rejected => match view.reject_reason {
            Some(RejectReason::InsufficientFunds) => Err(GatewayError::InsufficientFunds),
            Some(RejectReason::AccountDisabled) => Err(GatewayError::AccountDisabled),
            None => Err(GatewayError::Internal(
                "rejected entry carries no reason".to_string(),
            )),
        },
    }
}

fn parse_uuid_field(value: &str, field: &str) -> GatewayResult<Uuid> {
    Uuid::parse_str(value).map_err(|_| validation_error(field, "must be a valid UUID"))
}

fn validation_error(field: &str, message: &str) -> GatewayError {
    GatewayError::ValidationFailed(vec![FieldError::new(field.to_string(), message.to_string())])
}

fn map_db_err(err: sea_orm::DbErr) -> GatewayError {
    LedgerError::Database(err).into()
}
