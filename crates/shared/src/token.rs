//! Session token issuance and verification.
//!
//! Tokens are self-contained signed JWTs: signature and expiry verify
//! without a storage round trip. The one piece of shared state is the
//! revocation set, checked on every verification so a compromised terminal
//! or session can be cut off immediately.

use chrono::{DateTime, Duration, Utc};
use dashmap::DashSet;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::config::TokenSettings;
use crate::types::AccountRole;

/// Token claims proving a prior successful authentication.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (account ID).
    pub sub: Uuid,
    /// Account role at issuance time.
    pub role: String,
    /// Issued-at timestamp (seconds).
    pub iat: i64,
    /// Expiry timestamp (seconds).
    pub exp: i64,
    /// Unique token identifier, used for revocation.
    pub jti: Uuid,
}

impl Claims {
    /// Creates new claims for an account.
    #[must_use]
    pub fn new(account_id: Uuid, role: AccountRole, expires_at: DateTime<Utc>) -> Self {
        Self {
            sub: account_id,
            role: role.to_string(),
            iat: Utc::now().timestamp(),
            exp: expires_at.timestamp(),
            jti: Uuid::new_v4(),
        }
    }

    /// Returns the account ID from the claims.
    #[must_use]
    pub const fn account_id(&self) -> Uuid {
        self.sub
    }

    /// Parses the role claim.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Invalid` if the role string is not recognized.
    pub fn account_role(&self) -> Result<AccountRole, TokenError> {
        self.role.parse().map_err(|_| TokenError::Invalid)
    }
}

/// Token signing configuration.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// Secret key for signing tokens.
    pub secret: String,
    /// Terminal session TTL in minutes.
    pub terminal_ttl_minutes: i64,
    /// Customer session TTL in minutes.
    pub customer_ttl_minutes: i64,
    /// Merchant session TTL in minutes.
    pub merchant_ttl_minutes: i64,
    /// Admin session TTL in minutes.
    pub admin_ttl_minutes: i64,
}

impl TokenConfig {
    /// Returns the configured TTL in minutes for a role.
    #[must_use]
    pub const fn ttl_minutes(&self, role: AccountRole) -> i64 {
        match role {
            AccountRole::Terminal => self.terminal_ttl_minutes,
            AccountRole::Customer => self.customer_ttl_minutes,
            AccountRole::Merchant => self.merchant_ttl_minutes,
            AccountRole::Admin => self.admin_ttl_minutes,
        }
    }
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            secret: "change-me-in-production".to_string(),
            terminal_ttl_minutes: 15,
            customer_ttl_minutes: 30,
            merchant_ttl_minutes: 60,
            admin_ttl_minutes: 240,
        }
    }
}

impl From<&TokenSettings> for TokenConfig {
    fn from(settings: &TokenSettings) -> Self {
        Self {
            secret: settings.secret.clone(),
            terminal_ttl_minutes: settings.terminal_ttl_minutes,
            customer_ttl_minutes: settings.customer_ttl_minutes,
            merchant_ttl_minutes: settings.merchant_ttl_minutes,
            admin_ttl_minutes: settings.admin_ttl_minutes,
        }
    }
}

/// Errors that can occur during token operations.
#[derive(Debug, Error)]
pub enum TokenError {
    /// Token encoding failed.
    #[error("failed to encode token: {0}")]
    Encoding(String),

    /// Token has expired.
    #[error("token has expired")]
    Expired,

    /// Token has been revoked.
    #[error("token has been revoked")]
    Revoked,

    /// Token is malformed or its signature does not verify.
    #[error("invalid token")]
    Invalid,
}

impl From<TokenError> for crate::error::GatewayError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Expired => Self::TokenExpired,
            TokenError::Revoked => Self::TokenRevoked,
            TokenError::Invalid => Self::TokenInvalid,
            TokenError::Encoding(detail) => Self::Internal(detail),
        }
    }
}

/// A freshly issued session token.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    /// The encoded token string.
    pub token: String,
    /// Unique token identifier (for later revocation).
    pub jti: Uuid,
    /// Seconds until expiry.
    pub expires_in: i64,
}

/// Session token service.
#[derive(Clone)]
pub struct TokenService {
    config: TokenConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    revoked: std::sync::Arc<DashSet<Uuid>>,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("encoding_key", &"[hidden]")
            .field("decoding_key", &"[hidden]")
            .field("revoked_count", &self.revoked.len())
            .finish_non_exhaustive()
    }
}

impl TokenService {
    /// Creates a new token service with the given configuration.
    #[must_use]
    pub fn new(config: TokenConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());
        Self {
            config,
            encoding_key,
            decoding_key,
            revoked: std::sync::Arc::new(DashSet::new()),
        }
    }

    /// Issues a session token for an account with the role's TTL.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Encoding` if token generation fails.
    pub fn issue(&self, account_id: Uuid, role: AccountRole) -> Result<IssuedToken, TokenError> {
        let ttl = Duration::minutes(self.config.ttl_minutes(role));
        let claims = Claims::new(account_id, role, Utc::now() + ttl);
        let jti = claims.jti;

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Encoding(e.to_string()))?;

        Ok(IssuedToken {
            token,
            jti,
            expires_in: ttl.num_seconds(),
        })
    }

    /// Verifies a token: signature, expiry, then the revocation set.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Expired` past the TTL, `TokenError::Revoked`
    /// after explicit revocation, `TokenError::Invalid` otherwise.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::default();
        validation.leeway = 0;

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            })?;

        if self.revoked.contains(&claims.jti) {
            return Err(TokenError::Revoked);
        }

        Ok(claims)
    }

    /// Adds a token identifier to the revocation set.
    pub fn revoke(&self, jti: Uuid) {
        self.revoked.insert(jti);
    }

    /// Returns true if the token identifier has been revoked.
    #[must_use]
    pub fn is_revoked(&self, jti: Uuid) -> bool {
        self.revoked.contains(&jti)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_service() -> TokenService {
        TokenService::new(TokenConfig {
            secret: "test-secret-key-for-testing".to_string(),
            ..TokenConfig::default()
        })
    }

    #[test]
    fn test_issue_and_verify() {
        let service = create_test_service();
        let account_id = Uuid::new_v4();

        let issued = service.issue(account_id, AccountRole::Terminal).unwrap();
        assert!(!issued.token.is_empty());
        assert_eq!(issued.expires_in, 15 * 60);

        let claims = service.verify(&issued.token).unwrap();
        assert_eq!(claims.account_id(), account_id);
        assert_eq!(claims.account_role().unwrap(), AccountRole::Terminal);
        assert_eq!(claims.jti, issued.jti);
    }

    #[test]
    fn test_ttl_per_role() {
        let config = TokenConfig::default();
        assert!(config.ttl_minutes(AccountRole::Terminal) < config.ttl_minutes(AccountRole::Admin));

        let service = create_test_service();
        let admin = service.issue(Uuid::new_v4(), AccountRole::Admin).unwrap();
        assert_eq!(admin.expires_in, 240 * 60);
    }

    #[test]
    fn test_invalid_token() {
        let service = create_test_service();
        assert!(matches!(
            service.verify("not.a.token"),
            Err(TokenError::Invalid)
        ));
    }

    #[test]
    fn test_wrong_secret_is_invalid() {
        let service = create_test_service();
        let other = TokenService::new(TokenConfig {
            secret: "a-different-secret".to_string(),
            ..TokenConfig::default()
        });

        let issued = service.issue(Uuid::new_v4(), AccountRole::Merchant).unwrap();
        assert!(matches!(
            other.verify(&issued.token),
            Err(TokenError::Invalid)
        ));
    }

    #[test]
    fn test_revoked_token() {
        let service = create_test_service();
        let issued = service.issue(Uuid::new_v4(), AccountRole::Terminal).unwrap();

        service.revoke(issued.jti);
        assert!(service.is_revoked(issued.jti));
        assert!(matches!(
            service.verify(&issued.token),
            Err(TokenError::Revoked)
        ));
    }

    #[test]
    fn test_expired_token() {
        let service = create_test_service();

        // Encode claims whose expiry is already in the past.
        let mut claims = Claims::new(
            Uuid::new_v4(),
            AccountRole::Terminal,
            Utc::now() - Duration::minutes(1),
        );
        claims.iat = (Utc::now() - Duration::minutes(16)).timestamp();

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret("test-secret-key-for-testing".as_bytes()),
        )
        .unwrap();

        assert!(matches!(service.verify(&token), Err(TokenError::Expired)));
    }
}
