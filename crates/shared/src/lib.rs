//! Shared types, errors, and configuration for Tillgate.
//!
//! This crate provides common types used across all other crates:
//! - The gateway error taxonomy returned to clients
//! - Account roles, operation kinds, and entry statuses
//! - Request/response payloads for the HTTP surface
//! - Session token issuance and verification
//! - Configuration management

pub mod auth;
pub mod config;
pub mod error;
pub mod token;
pub mod types;

pub use config::AppConfig;
pub use error::{FieldError, GatewayError, GatewayResult};
pub use token::{Claims, TokenConfig, TokenError, TokenService};
