//! In-Process Store Module
//!
//! HashMap-backed [`KvStore`] with lazy expiry on access plus a periodic sweep.
//! Mirrors the Redis semantics the gateway relies on, so the whole HTTP surface
//! can run (and be tested) without a Redis server.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{
    format_human_bytes, glob_match, KvStore, ServerInfo, StoreError, StoreResult, StoreStats,
    StoredEntry,
};

// == Memory Store ==
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, StoredEntry>>,
    stats: StoreStats,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    // == Purge Expired ==
    /// Removes every expired entry and returns how many were dropped.
    pub async fn purge_expired(&self) -> usize {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired());
        before - entries.len()
    }

    /// Number of live (unexpired) entries.
    pub async fn len(&self) -> usize {
        let entries = self.entries.read().await;
        entries.values().filter(|entry| !entry.is_expired()).count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Runs `f` against the live entry for `key`, dropping it first if expired.
    async fn with_live_entry<T>(
        &self,
        key: &str,
        f: impl FnOnce(&mut StoredEntry) -> T,
    ) -> StoreResult<T> {
        self.stats.record_command();
        let mut entries = self.entries.write().await;
        let expired = match entries.get(key) {
            Some(entry) => entry.is_expired(),
            None => return Err(StoreError::NotFound),
        };
        if expired {
            entries.remove(key);
            return Err(StoreError::NotFound);
        }
        entries.get_mut(key).map(f).ok_or(StoreError::NotFound)
    }
}

#[async_trait]
impl KvStore for MemoryStore {
    async fn ping(&self) -> StoreResult<()> {
        self.stats.record_command();
        Ok(())
    }

    async fn get(&self, key: &str) -> StoreResult<String> {
        self.with_live_entry(key, |entry| entry.value.clone()).await
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.stats.record_command();
        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), StoredEntry::persistent(value.to_string()));
        Ok(())
    }

    async fn set_with_expiry(&self, key: &str, value: &str, ttl_secs: u64) -> StoreResult<()> {
        self.stats.record_command();
        if ttl_secs == 0 {
            return Err(StoreError::Operation(
                "invalid expire time in 'set' command".to_string(),
            ));
        }
        let mut entries = self.entries.write().await;
        entries.insert(
            key.to_string(),
            StoredEntry::expiring(value.to_string(), ttl_secs),
        );
        Ok(())
    }

    async fn delete(&self, key: &str) -> StoreResult<()> {
        self.stats.record_command();
        let mut entries = self.entries.write().await;
        match entries.remove(key) {
            Some(entry) if !entry.is_expired() => Ok(()),
            _ => Err(StoreError::NotFound),
        }
    }

    async fn exists(&self, key: &str) -> StoreResult<bool> {
        match self.with_live_entry(key, |_| ()).await {
            Ok(()) => Ok(true),
            Err(StoreError::NotFound) => Ok(false),
            Err(e) => Err(e),
        }
    }

    async fn expire(&self, key: &str, ttl_secs: u64) -> StoreResult<()> {
        self.with_live_entry(key, |entry| entry.expire_in(ttl_secs))
            .await
    }

    async fn ttl(&self, key: &str) -> StoreResult<Option<u64>> {
        self.with_live_entry(key, |entry| entry.ttl_remaining()).await
    }

    async fn keys(&self, pattern: &str) -> StoreResult<Vec<String>> {
        self.stats.record_command();
        let entries = self.entries.read().await;
        let mut keys: Vec<String> = entries
            .iter()
            .filter(|(_, entry)| !entry.is_expired())
            .filter(|(key, _)| glob_match(pattern, key))
            .map(|(key, _)| key.clone())
            .collect();
        keys.sort();
        Ok(keys)
    }

    async fn info(&self) -> StoreResult<ServerInfo> {
        self.stats.record_command();
        let entries = self.entries.read().await;
        let used_bytes: usize = entries
            .iter()
            .map(|(key, entry)| entry.size_hint(key))
            .sum();

        Ok(ServerInfo {
            connected_clients: 1,
            used_memory_human: format_human_bytes(used_bytes as u64),
            total_commands_processed: self.stats.commands_processed(),
            uptime_in_seconds: self.stats.uptime_secs(),
        })
    }
}
