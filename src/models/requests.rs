//! Request DTOs for the gateway API
//!
//! Defines incoming HTTP bodies and query strings, and the presence checks
//! performed on them before the store is touched.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::ApiError;

pub const INVALID_SET_REQUEST: &str = "Invalid request. Required fields: key, value";
pub const INVALID_TTL_REQUEST: &str = "Invalid request. Required field: ttl";
pub const INVALID_TTL_VALUE: &str = "Invalid TTL value";

/// Request body for the write operation (POST /data)
///
/// Fields are optional at the serde level so that a missing field is reported
/// with the gateway's own message instead of a deserializer error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SetRequest {
    pub key: Option<String>,
    /// Any JSON value; an explicit `null` counts as present
    #[serde(default, deserialize_with = "present")]
    pub value: Option<Value>,
    /// Optional TTL in seconds, an integer or a decimal string
    pub ttl: Option<Value>,
}

/// A write that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteRecord {
    pub key: String,
    pub value: String,
    pub ttl: Option<u64>,
}

impl SetRequest {
    /// Checks required fields and the optional TTL.
    pub fn validate(self) -> Result<WriteRecord, ApiError> {
        let (key, value) = match (self.key, self.value) {
            (Some(key), Some(value)) => (key, value),
            _ => return Err(ApiError::InvalidRequest(INVALID_SET_REQUEST.to_string())),
        };
        let value = stored_value(value)?;

        let ttl = match self.ttl {
            None => None,
            Some(raw) => Some(
                parse_ttl(&raw)
                    .ok_or_else(|| ApiError::InvalidRequest(INVALID_TTL_VALUE.to_string()))?,
            ),
        };

        Ok(WriteRecord { key, value, ttl })
    }
}

fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

/// Renders a JSON value as the string written to the store.
///
/// Strings are kept verbatim and numbers use their decimal text. Other types
/// are refused the way the Redis client refuses them, as a store error.
pub fn stored_value(raw: Value) -> Result<String, ApiError> {
    let type_name = match raw {
        Value::String(s) => return Ok(s),
        Value::Number(n) => return Ok(n.to_string()),
        Value::Bool(_) => "bool",
        Value::Null => "NoneType",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    };
    Err(ApiError::Store(format!(
        "Invalid input of type: '{}'. Convert to a bytes, string, int or float first.",
        type_name
    )))
}

/// Request body for the update-expiry operation (PUT /data/:key/ttl)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TtlRequest {
    pub ttl: Option<Value>,
}

impl TtlRequest {
    /// Returns the requested TTL in seconds.
    pub fn validate(self) -> Result<u64, ApiError> {
        let raw = self
            .ttl
            .ok_or_else(|| ApiError::InvalidRequest(INVALID_TTL_REQUEST.to_string()))?;
        parse_ttl(&raw).ok_or_else(|| ApiError::InvalidRequest(INVALID_TTL_VALUE.to_string()))
    }
}

/// Query string for the key listing (GET /data/keys)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KeysQuery {
    pub pattern: Option<String>,
}

impl KeysQuery {
    /// Glob pattern to list, `*` when none was given.
    pub fn pattern(&self) -> &str {
        self.pattern.as_deref().unwrap_or("*")
    }
}

/// Accepts a positive JSON integer or a string holding one.
///
/// `0` is refused even though it is non-negative: Redis rejects `SET ... EX 0`
/// and `EXPIRE key 0` deletes the key instead of setting an expiry.
pub fn parse_ttl(raw: &Value) -> Option<u64> {
    let secs = match raw {
        Value::Number(n) => n.as_u64()?,
        Value::String(s) => s.trim().parse::<u64>().ok()?,
        _ => return None,
    };
    (secs > 0).then_some(secs)
}
