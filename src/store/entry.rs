//! Stored Entry Module
//!
//! A single record held by the in-process store, with optional expiry.

use std::time::{SystemTime, UNIX_EPOCH};

// == Stored Entry ==
#[derive(Debug, Clone)]
pub struct StoredEntry {
    /// The stored string (an encoded envelope or a legacy raw value)
    pub value: String,
    /// Expiration timestamp (Unix milliseconds), None = no expiration
    pub expires_at: Option<u64>,
}

impl StoredEntry {
    /// Creates an entry that never expires.
    pub fn persistent(value: String) -> Self {
        Self {
            value,
            expires_at: None,
        }
    }

    /// Creates an entry that expires `ttl_seconds` from now.
    pub fn expiring(value: String, ttl_seconds: u64) -> Self {
        let mut entry = Self::persistent(value);
        entry.expire_in(ttl_seconds);
        entry
    }

    /// Re-arms the expiry, counting from now.
    pub fn expire_in(&mut self, ttl_seconds: u64) {
        let ttl_ms = ttl_seconds.saturating_mul(1000);
        self.expires_at = Some(current_timestamp_ms().saturating_add(ttl_ms));
    }

    // == Is Expired ==
    /// An entry is expired once the current time reaches its expiration time.
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires) => current_timestamp_ms() >= expires,
            None => false,
        }
    }

    /// Returns remaining TTL in milliseconds, or None if no expiration is set.
    pub fn ttl_remaining_ms(&self) -> Option<u64> {
        self.expires_at
            .map(|expires| expires.saturating_sub(current_timestamp_ms()))
    }

    /// Returns remaining TTL in whole seconds, rounded to nearest like Redis does.
    pub fn ttl_remaining(&self) -> Option<u64> {
        self.ttl_remaining_ms().map(|ms| (ms + 500) / 1000)
    }

    /// Approximate footprint of the entry in bytes.
    pub fn size_hint(&self, key: &str) -> usize {
        key.len() + self.value.len() + std::mem::size_of::<Self>()
    }
}

/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
