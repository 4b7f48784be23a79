//! Stored record envelope
//!
//! Every write stores `{value, timestamp, ttl}` serialized as one JSON string.
//! `timestamp` and `ttl` are informational: expiry is enforced by the store
//! alone, and updating a key's TTL leaves the embedded `ttl` untouched.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    /// Caller-supplied payload
    pub value: String,
    /// RFC 3339 UTC time of the write
    pub timestamp: String,
    /// TTL requested at write time, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u64>,
}

impl Envelope {
    /// Wraps a value stamped with the current time.
    pub fn new(value: impl Into<String>, ttl: Option<u64>) -> Self {
        Self {
            value: value.into(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
            ttl,
        }
    }

    pub fn encode(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Recovers the caller's value from a stored string.
    ///
    /// Strings written before the envelope existed are returned as-is.
    pub fn value_from_stored(stored: String) -> String {
        match serde_json::from_str::<Envelope>(&stored) {
            Ok(envelope) => envelope.value,
            Err(_) => stored,
        }
    }
}
