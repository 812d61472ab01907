//! Authentication and authorization primitives.
//!
//! This module provides:
//! - Credential hashing with Argon2id
//! - Credential verification that fails closed
//! - The role permission policy applied by the gateway

mod password;
mod policy;

pub use password::{CredentialError, DUMMY_HASH, hash_secret, verify_secret};
pub use policy::RolePolicy;
