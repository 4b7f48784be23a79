//! Redis Store Module
//!
//! [`KvStore`] backed by a Redis server through a shared `ConnectionManager`.

use std::collections::HashMap;

use async_trait::async_trait;
use redis::aio::{ConnectionManager, ConnectionManagerConfig};
use redis::{AsyncCommands, Client, RedisError};
use tokio::sync::OnceCell;
use tracing::info;

use super::{KvStore, ServerInfo, StoreError, StoreResult};

/// `TTL` reply for a missing key.
const TTL_NO_SUCH_KEY: i64 = -2;
/// `TTL` reply for a key without expiry.
const TTL_NO_EXPIRY: i64 = -1;

impl From<RedisError> for StoreError {
    fn from(err: RedisError) -> Self {
        if err.is_io_error()
            || err.is_connection_refusal()
            || err.is_connection_dropped()
            || err.is_timeout()
        {
            StoreError::Connection(err.to_string())
        } else {
            StoreError::Operation(err.to_string())
        }
    }
}

// == Redis Store ==
/// Long-lived Redis client.
///
/// The connection is established on first use and then reused by every
/// request. Building the store never touches the network, so the gateway can
/// start (and report itself unhealthy) while Redis is down. A failed connect
/// is reported straight away, without retries.
pub struct RedisStore {
    client: Client,
    url: String,
    connection: OnceCell<ConnectionManager>,
}

impl RedisStore {
    /// Validates the URL and prepares the client.
    pub fn open(url: &str) -> StoreResult<Self> {
        let client = Client::open(url)?;
        Ok(Self {
            client,
            url: url.to_string(),
            connection: OnceCell::new(),
        })
    }

    async fn connection(&self) -> StoreResult<ConnectionManager> {
        let manager = self
            .connection
            .get_or_try_init(|| async {
                let config = ConnectionManagerConfig::new().set_number_of_retries(0);
                let manager =
                    ConnectionManager::new_with_config(self.client.clone(), config).await?;
                info!(url = %self.url, "Connected to Redis");
                Ok::<_, RedisError>(manager)
            })
            .await?;
        Ok(manager.clone())
    }
}

#[async_trait]
impl KvStore for RedisStore {
    async fn ping(&self) -> StoreResult<()> {
        let mut conn = self.connection().await?;
        redis::cmd("PING").query_async::<String>(&mut conn).await?;
        Ok(())
    }

    async fn get(&self, key: &str) -> StoreResult<String> {
        let mut conn = self.connection().await?;
        let value: Option<String> = conn.get(key).await?;
        value.ok_or(StoreError::NotFound)
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut conn = self.connection().await?;
        conn.set::<_, _, ()>(key, value).await?;
        Ok(())
    }

    async fn set_with_expiry(&self, key: &str, value: &str, ttl_secs: u64) -> StoreResult<()> {
        let mut conn = self.connection().await?;
        conn.set_ex::<_, _, ()>(key, value, ttl_secs).await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> StoreResult<()> {
        let mut conn = self.connection().await?;
        let removed: usize = conn.del(key).await?;
        if removed == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn exists(&self, key: &str) -> StoreResult<bool> {
        let mut conn = self.connection().await?;
        let found: bool = conn.exists(key).await?;
        Ok(found)
    }

    async fn expire(&self, key: &str, ttl_secs: u64) -> StoreResult<()> {
        let mut conn = self.connection().await?;
        let seconds = i64::try_from(ttl_secs).unwrap_or(i64::MAX);
        let applied: bool = conn.expire(key, seconds).await?;
        if !applied {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn ttl(&self, key: &str) -> StoreResult<Option<u64>> {
        let mut conn = self.connection().await?;
        let remaining: i64 = conn.ttl(key).await?;
        ttl_from_reply(remaining)
    }

    async fn keys(&self, pattern: &str) -> StoreResult<Vec<String>> {
        let mut conn = self.connection().await?;
        let keys: Vec<String> = conn.keys(pattern).await?;
        Ok(keys)
    }

    async fn info(&self) -> StoreResult<ServerInfo> {
        let mut conn = self.connection().await?;
        let raw: String = redis::cmd("INFO").query_async(&mut conn).await?;
        parse_info(&raw)
    }
}

/// Maps the ternary `TTL` reply onto the store contract.
fn ttl_from_reply(reply: i64) -> StoreResult<Option<u64>> {
    match reply {
        TTL_NO_SUCH_KEY => Err(StoreError::NotFound),
        TTL_NO_EXPIRY => Ok(None),
        secs if secs >= 0 => Ok(Some(secs as u64)),
        other => Err(StoreError::Operation(format!(
            "unexpected TTL reply: {}",
            other
        ))),
    }
}

// == INFO Parsing ==
/// Extracts the metrics fields from a raw `INFO` reply.
///
/// The reply is a list of `field:value` lines grouped under `# Section`
/// headers.
fn parse_info(raw: &str) -> StoreResult<ServerInfo> {
    let fields: HashMap<&str, &str> = raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once(':'))
        .collect();

    let text = |name: &str| -> StoreResult<String> {
        fields
            .get(name)
            .map(|v| v.to_string())
            .ok_or_else(|| StoreError::Operation(format!("INFO reply missing '{}'", name)))
    };
    let number = |name: &str| -> StoreResult<u64> {
        text(name)?
            .parse()
            .map_err(|_| StoreError::Operation(format!("INFO field '{}' is not a number", name)))
    };

    Ok(ServerInfo {
        connected_clients: number("connected_clients")?,
        used_memory_human: text("used_memory_human")?,
        total_commands_processed: number("total_commands_processed")?,
        uptime_in_seconds: number("uptime_in_seconds")?,
    })
}
