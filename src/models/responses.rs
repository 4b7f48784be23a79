//! Response DTOs for the gateway API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::store::ServerInfo;

/// Response body for the read operation (GET /data/:key)
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    pub key: String,
    pub value: String,
}

impl GetResponse {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Plain confirmation body shared by the write, delete and TTL update operations.
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// POST /data
    pub fn stored() -> Self {
        Self::new("Data stored successfully")
    }

    /// DELETE /data/:key
    pub fn deleted(key: &str) -> Self {
        Self::new(format!("Key {} deleted successfully", key))
    }

    /// PUT /data/:key/ttl
    pub fn ttl_updated(key: &str) -> Self {
        Self::new(format!("TTL updated for key {}", key))
    }
}

/// Response body for GET /data/:key/ttl
///
/// `ttl` serializes as `null` when the key never expires.
#[derive(Debug, Clone, Serialize)]
pub struct TtlResponse {
    pub key: String,
    pub ttl: Option<u64>,
}

/// Response body for GET /data/keys
#[derive(Debug, Clone, Serialize)]
pub struct KeysResponse {
    pub keys: Vec<String>,
}

/// Response body for GET /metrics
#[derive(Debug, Clone, Serialize)]
pub struct MetricsResponse {
    pub connected_clients: u64,
    /// Human-readable memory usage as reported by the store (e.g. `1.05M`)
    pub used_memory: String,
    pub total_commands_processed: u64,
    pub uptime_seconds: u64,
}

impl From<ServerInfo> for MetricsResponse {
    fn from(info: ServerInfo) -> Self {
        Self {
            connected_clients: info.connected_clients,
            used_memory: info.used_memory_human,
            total_commands_processed: info.total_commands_processed,
            uptime_seconds: info.uptime_in_seconds,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// `healthy` or `unhealthy`
    pub status: String,
    /// `connected` or `disconnected`
    pub redis: String,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            redis: "connected".to_string(),
        }
    }

    pub fn unhealthy() -> Self {
        Self {
            status: "unhealthy".to_string(),
            redis: "disconnected".to_string(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
