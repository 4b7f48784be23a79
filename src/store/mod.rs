//! Store Module
//!
//! Narrow client abstraction over the backing key-value store. Handlers only
//! ever talk to a [`KvStore`]; the concrete backend is picked once at startup.

mod entry;
mod glob;
mod memory;
mod redis_store;
mod stats;

#[cfg(test)]
mod property_tests;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

pub use entry::StoredEntry;
pub use glob::glob_match;
pub use memory::MemoryStore;
pub use redis_store::RedisStore;
pub use stats::{format_human_bytes, StoreStats};

// == Store Error ==
/// Tagged failure returned by every store operation.
///
/// Endpoints pattern-match on this to pick a status code.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The key does not exist (or has expired)
    #[error("key not found")]
    NotFound,

    /// The store could not be reached
    #[error("{0}")]
    Connection(String),

    /// The store was reached but the command failed
    #[error("{0}")]
    Operation(String),
}

/// Convenience Result type for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

// == Server Info ==
/// Subset of the store's introspection data exposed by `/metrics`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerInfo {
    pub connected_clients: u64,
    pub used_memory_human: String,
    pub total_commands_processed: u64,
    pub uptime_in_seconds: u64,
}

// == KvStore Trait ==
/// Capability set the gateway consumes from the store.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Checks that the store is reachable.
    async fn ping(&self) -> StoreResult<()>;

    /// Returns the stored string, or `NotFound`.
    async fn get(&self, key: &str) -> StoreResult<String>;

    /// Stores `value` without expiry, replacing any previous record and expiry.
    async fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Stores `value` and arms an expiry in one atomic operation.
    async fn set_with_expiry(&self, key: &str, value: &str, ttl_secs: u64) -> StoreResult<()>;

    /// Removes the key, or returns `NotFound` if nothing was removed.
    async fn delete(&self, key: &str) -> StoreResult<()>;

    async fn exists(&self, key: &str) -> StoreResult<bool>;

    /// Sets or replaces the expiry of an existing key.
    async fn expire(&self, key: &str, ttl_secs: u64) -> StoreResult<()>;

    /// Remaining lifetime in seconds; `Ok(None)` when the key never expires.
    async fn ttl(&self, key: &str) -> StoreResult<Option<u64>>;

    /// Lists keys matching a glob pattern.
    async fn keys(&self, pattern: &str) -> StoreResult<Vec<String>>;

    async fn info(&self) -> StoreResult<ServerInfo>;
}

/// Store handle shared by all request handlers.
pub type SharedStore = Arc<dyn KvStore>;
