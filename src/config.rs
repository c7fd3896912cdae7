//! Configuration Module
//!
//! Handles loading and managing service configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Port of the Prometheus `/metrics` listener
    pub metrics_port: u16,
    /// sqlx SQLite connection URL
    pub database_url: String,
    /// Maximum pooled database connections
    pub db_max_connections: u32,
    /// TTL in seconds applied to cached records and the cached listing
    pub cache_ttl_secs: u64,
    /// Capacity of the per-record cache, 0 means unbounded
    pub cache_max_entries: usize,
    /// Deadline in seconds for each service call
    pub request_timeout_secs: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `APP_PORT` - HTTP server port (default: 8080)
    /// - `METRICS_PORT` - Prometheus metrics port (default: 9100)
    /// - `DATABASE_URL` - SQLite URL (default: sqlite:vehicles.db)
    /// - `DB_MAX_CONNECTIONS` - Pool size (default: 10)
    /// - `CACHE_TTL_SECONDS` - Cache TTL in seconds, 0 disables caching (default: 60)
    /// - `CACHE_MAX_ENTRIES` - Record cache capacity, 0 = unbounded (default: 0)
    /// - `REQUEST_TIMEOUT_SECONDS` - Per-call deadline (default: 5)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: env_or("APP_PORT", defaults.server_port),
            metrics_port: env_or("METRICS_PORT", defaults.metrics_port),
            database_url: env::var("DATABASE_URL")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.database_url),
            db_max_connections: env_or("DB_MAX_CONNECTIONS", defaults.db_max_connections),
            cache_ttl_secs: env_or("CACHE_TTL_SECONDS", defaults.cache_ttl_secs),
            cache_max_entries: env_or("CACHE_MAX_ENTRIES", defaults.cache_max_entries),
            request_timeout_secs: env_or("REQUEST_TIMEOUT_SECONDS", defaults.request_timeout_secs),
        }
    }

    /// A zero TTL turns the caching decorator off entirely.
    pub fn cache_enabled(&self) -> bool {
        self.cache_ttl_secs > 0
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Capacity bound for the record cache, None when unbounded.
    pub fn cache_capacity(&self) -> Option<usize> {
        (self.cache_max_entries > 0).then_some(self.cache_max_entries)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 8080,
            metrics_port: 9100,
            database_url: "sqlite:vehicles.db".to_string(),
            db_max_connections: 10,
            cache_ttl_secs: 60,
            cache_max_entries: 0,
            request_timeout_secs: 5,
        }
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
