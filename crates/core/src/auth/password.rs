//! Credential hashing with Argon2id.
//!
//! Uses the recommended Argon2id variant with secure defaults. Verification
//! is constant-time inside the Argon2 comparison, and any internal error is
//! reported as a non-match, never as a match.

use argon2::{
    Argon2, PasswordHash,
    password_hash::{PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use thiserror::Error;

/// A well-formed Argon2id hash that matches no real secret.
///
/// Verifying an incoming secret against this hash costs the same as a real
/// verification, so the timing of a login against an unknown account is
/// indistinguishable from a wrong-secret login.
pub const DUMMY_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$gZiV/M1gPc22ElAH/Jh1Hw$CWOrkoo7oJBQ/iyh7uJ0LO2aLEfrHwTWllSAxT0zRno";

/// Errors that can occur while hashing a secret.
#[derive(Debug, Error)]
pub enum CredentialError {
    /// Failed to hash the secret.
    #[error("failed to hash secret: {0}")]
    Hash(String),
}

/// Hashes a secret using Argon2id.
///
/// Returns the hash as a PHC string. The plaintext is never stored.
///
/// # Errors
///
/// Returns `CredentialError::Hash` if hashing fails.
pub fn hash_secret(secret: &str) -> Result<String, CredentialError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(secret.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| CredentialError::Hash(e.to_string()))
}

/// Verifies a secret against a stored hash.
///
/// Fails closed: a malformed stored hash or any internal verifier error
/// returns `false`, never a match.
#[must_use]
pub fn verify_secret(secret: &str, hash: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(secret.as_bytes(), &parsed_hash)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_secret() {
        let hash = hash_secret("test_secret_123!").unwrap();

        // Hash should be in PHC format and differ from the plaintext.
        assert!(hash.starts_with("$argon2id$"));
        assert_ne!(hash, "test_secret_123!");
    }

    #[test]
    fn test_verify_correct_secret() {
        let hash = hash_secret("correct_secret").unwrap();
        assert!(verify_secret("correct_secret", &hash));
    }

    #[test]
    fn test_verify_wrong_secret() {
        let hash = hash_secret("correct_secret").unwrap();
        assert!(!verify_secret("wrong_secret", &hash));
    }

    #[test]
    fn test_different_secrets_different_hashes() {
        // Same secret should produce different hashes (random salt).
        let hash1 = hash_secret("secret1").unwrap();
        let hash2 = hash_secret("secret1").unwrap();
        assert_ne!(hash1, hash2);
    }

    #[test]
    fn test_malformed_hash_fails_closed() {
        assert!(!verify_secret("anything", "not-a-phc-hash"));
        assert!(!verify_secret("anything", ""));
    }

    #[test]
    fn test_dummy_hash_parses_and_never_matches() {
        assert!(PasswordHash::new(DUMMY_HASH).is_ok());
        assert!(!verify_secret("anything", DUMMY_HASH));
        assert!(!verify_secret("", DUMMY_HASH));
    }
}
