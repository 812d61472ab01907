//! Request guard: the pipeline stage every inbound request passes before
//! any business logic runs.
//!
//! Order matters and is fixed:
//! 1. Rate limiting - cheapest rejection, runs before any CPU is spent.
//! 2. Sanitization - free-text fields are stripped of executable markup.
//! 3. Structural validation - assumes already-sanitized input; reports
//!    every failing field, not just the first.
//!
//! A rejection at any stage short-circuits; the ledger is never touched.

mod rate;
mod sanitize;
mod validate;

pub use rate::RateLimiter;
pub use sanitize::{Sanitize, sanitize_text};
pub use validate::check_payload;
