//! Configuration Module
//!
//! Handles loading and managing gateway configuration from environment variables.

use std::env;
use std::fmt;
use std::str::FromStr;

/// Which store implementation backs the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// A Redis server at `REDIS_HOST:REDIS_PORT`
    Redis,
    /// The in-process store, for local development
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "redis" => Ok(StoreBackend::Redis),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(format!("unknown store backend '{}'", other)),
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreBackend::Redis => write!(f, "redis"),
            StoreBackend::Memory => write!(f, "memory"),
        }
    }
}

/// Gateway configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Redis host name
    pub redis_host: String,
    /// Redis port
    pub redis_port: u16,
    /// HTTP server port
    pub server_port: u16,
    /// Store implementation
    pub store_backend: StoreBackend,
    /// Expiry sweep interval in seconds (in-process store only)
    pub cleanup_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `REDIS_HOST` - Redis host (default: redis)
    /// - `REDIS_PORT` - Redis port (default: 6379)
    /// - `SERVER_PORT` - HTTP server port (default: 5001)
    /// - `STORE_BACKEND` - `redis` or `memory` (default: redis)
    /// - `CLEANUP_INTERVAL` - Expiry sweep frequency in seconds (default: 1)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            redis_host: env::var("REDIS_HOST").unwrap_or(defaults.redis_host),
            redis_port: parse_env("REDIS_PORT").unwrap_or(defaults.redis_port),
            server_port: parse_env("SERVER_PORT").unwrap_or(defaults.server_port),
            store_backend: parse_env("STORE_BACKEND").unwrap_or(defaults.store_backend),
            cleanup_interval: parse_env("CLEANUP_INTERVAL").unwrap_or(defaults.cleanup_interval),
        }
    }

    /// Connection URL for the Redis client.
    pub fn redis_url(&self) -> String {
        format!("redis://{}:{}/", self.redis_host, self.redis_port)
    }
}

fn parse_env<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            redis_host: "redis".to_string(),
            redis_port: 6379,
            server_port: 5001,
            store_backend: StoreBackend::Redis,
            cleanup_interval: 1,
        }
    }
}
