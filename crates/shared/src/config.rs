//! Application configuration management.
//!
//! All configuration is process-wide, loaded once at startup. There is no
//! hot-reload; restarting the gateway picks up changes.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Session token configuration.
    pub token: TokenSettings,
    /// Rate limit configuration.
    pub rate_limit: RateLimitSettings,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    /// Bound on waiting for a pooled connection, in seconds.
    ///
    /// A request never hangs on storage; past this bound the client
    /// receives a transient failure and may retry with the same
    /// idempotency key.
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
    /// Bound on establishing a new connection, in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_acquire_timeout() -> u64 {
    5
}

fn default_connect_timeout() -> u64 {
    5
}

/// Session token configuration.
///
/// TTLs are per role: terminals are the most exposed devices and get the
/// shortest sessions, admin sessions the longest.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenSettings {
    /// Secret key for signing tokens. Never logged.
    pub secret: String,
    /// Terminal session TTL in minutes.
    #[serde(default = "default_terminal_ttl")]
    pub terminal_ttl_minutes: i64,
    /// Customer session TTL in minutes.
    #[serde(default = "default_customer_ttl")]
    pub customer_ttl_minutes: i64,
    /// Merchant session TTL in minutes.
    #[serde(default = "default_merchant_ttl")]
    pub merchant_ttl_minutes: i64,
    /// Admin session TTL in minutes.
    #[serde(default = "default_admin_ttl")]
    pub admin_ttl_minutes: i64,
}

fn default_terminal_ttl() -> i64 {
    15
}

fn default_customer_ttl() -> i64 {
    30
}

fn default_merchant_ttl() -> i64 {
    60
}

fn default_admin_ttl() -> i64 {
    240
}

/// Rate limit configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitSettings {
    /// Maximum requests per client key per window.
    #[serde(default = "default_threshold")]
    pub threshold: u32,
    /// Window length in seconds (fixed window).
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,
}

fn default_threshold() -> u32 {
    60
}

fn default_window_secs() -> u64 {
    60
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("TILLGATE").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(default_host(), "0.0.0.0");
        assert_eq!(default_port(), 8080);
        assert_eq!(default_threshold(), 60);
        assert_eq!(default_window_secs(), 60);
        // Terminals get the shortest sessions, admins the longest.
        assert!(default_terminal_ttl() < default_customer_ttl());
        assert!(default_customer_ttl() < default_merchant_ttl());
        assert!(default_merchant_ttl() < default_admin_ttl());
    }
}
