//! Core business logic for Tillgate.
//!
//! This crate contains pure business logic with ZERO web or database
//! dependencies. All domain rules live here.
//!
//! # Modules
//!
//! - `auth` - Credential hashing and role permission policy
//! - `guard` - Request guard: rate limiting, sanitization, validation
//! - `ledger` - Balance decision logic on integer minor units

pub mod auth;
pub mod guard;
pub mod ledger;
