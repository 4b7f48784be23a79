//! API Handlers
//!
//! HTTP request handlers, one per gateway operation. Each handler validates
//! its input, issues a single store call and maps the outcome to a status.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::{debug, error, info, warn};

use crate::error::{ApiError, Result};
use crate::models::requests::{INVALID_SET_REQUEST, INVALID_TTL_REQUEST};
use crate::models::{
    Envelope, GetResponse, HealthResponse, KeysQuery, KeysResponse, MessageResponse,
    MetricsResponse, SetRequest, TtlRequest, TtlResponse,
};
use crate::store::{KvStore, SharedStore, StoreError};

/// Application state shared across all handlers.
///
/// Holds the process-wide store client; handlers keep no other state.
#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
}

impl AppState {
    /// Creates a new AppState owning the given store.
    pub fn new(store: impl KvStore + 'static) -> Self {
        Self::from_shared(Arc::new(store))
    }

    /// Creates a new AppState around an already shared store.
    pub fn from_shared(store: SharedStore) -> Self {
        Self { store }
    }
}

/// Logs a store failure (other than a plain miss) and converts it.
///
/// `key` is `None` for operations that do not address a single key.
fn store_failure(operation: &'static str, key: Option<&str>, err: StoreError) -> ApiError {
    if !matches!(err, StoreError::NotFound) {
        error!(operation, key = key.unwrap_or("-"), error = %err, "store operation failed");
    }
    ApiError::from(err)
}

fn invalid(message: &str) -> ApiError {
    debug!(reason = message, "rejected request");
    ApiError::InvalidRequest(message.to_string())
}

/// Handler for GET /health
pub async fn health_handler(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    match state.store.ping().await {
        Ok(()) => (StatusCode::OK, Json(HealthResponse::healthy())),
        Err(err) => {
            warn!(error = %err, "health check failed, store unreachable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse::unhealthy()),
            )
        }
    }
}

/// Handler for POST /data
///
/// Wraps the value in an [`Envelope`] and stores it, with a native expiry
/// when `ttl` is given.
pub async fn set_handler(
    State(state): State<AppState>,
    body: std::result::Result<Json<SetRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>)> {
    let Json(req) = body.map_err(|_| invalid(INVALID_SET_REQUEST))?;
    let record = req.validate().map_err(|err| {
        debug!(error = %err, "rejected write");
        err
    })?;

    let encoded = Envelope::new(record.value, record.ttl)
        .encode()
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    let written = match record.ttl {
        Some(ttl) => {
            state
                .store
                .set_with_expiry(&record.key, &encoded, ttl)
                .await
        }
        None => state.store.set(&record.key, &encoded).await,
    };
    written.map_err(|e| store_failure("set", Some(record.key.as_str()), e))?;

    info!(key = %record.key, ttl = ?record.ttl, "stored record");
    Ok((StatusCode::CREATED, Json(MessageResponse::stored())))
}

/// Handler for GET /data/:key
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    let stored = state
        .store
        .get(&key)
        .await
        .map_err(|e| store_failure("get", Some(key.as_str()), e))?;

    let value = Envelope::value_from_stored(stored);
    Ok(Json(GetResponse::new(key, value)))
}

/// Handler for DELETE /data/:key
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<MessageResponse>> {
    state
        .store
        .delete(&key)
        .await
        .map_err(|e| store_failure("delete", Some(key.as_str()), e))?;

    info!(key = %key, "deleted record");
    Ok(Json(MessageResponse::deleted(&key)))
}

/// Handler for GET /data/:key/ttl
///
/// `ttl` is `null` for a key without expiry; a missing key is a 404.
pub async fn get_ttl_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<TtlResponse>> {
    let ttl = state
        .store
        .ttl(&key)
        .await
        .map_err(|e| store_failure("ttl", Some(key.as_str()), e))?;

    Ok(Json(TtlResponse { key, ttl }))
}

/// Handler for PUT /data/:key/ttl
///
/// Only the store's expiry changes; the envelope stored under the key keeps
/// the `ttl` it was written with.
pub async fn update_ttl_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    body: std::result::Result<Json<TtlRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>> {
    let Json(req) = body.map_err(|_| invalid(INVALID_TTL_REQUEST))?;
    let ttl = req.validate().map_err(|err| {
        debug!(key = %key, error = %err, "rejected TTL update");
        err
    })?;

    state
        .store
        .expire(&key, ttl)
        .await
        .map_err(|e| store_failure("expire", Some(key.as_str()), e))?;

    info!(key = %key, ttl, "updated TTL");
    Ok(Json(MessageResponse::ttl_updated(&key)))
}

/// Handler for GET /data/keys
pub async fn keys_handler(
    State(state): State<AppState>,
    Query(query): Query<KeysQuery>,
) -> Result<Json<KeysResponse>> {
    let pattern = query.pattern();
    let keys = state
        .store
        .keys(pattern)
        .await
        .map_err(|e| store_failure("keys", Some(pattern), e))?;

    debug!(pattern, count = keys.len(), "listed keys");
    Ok(Json(KeysResponse { keys }))
}

/// Handler for GET /metrics
pub async fn metrics_handler(State(state): State<AppState>) -> Result<Json<MetricsResponse>> {
    let info = state
        .store
        .info()
        .await
        .map_err(|e| store_failure("info", None, e))?;

    Ok(Json(MetricsResponse::from(info)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    type Body = std::result::Result<Json<SetRequest>, JsonRejection>;

    fn set_body(key: &str, value: &str, ttl: Option<u64>) -> Body {
        Ok(Json(SetRequest {
            key: Some(key.to_string()),
            value: Some(serde_json::Value::from(value)),
            ttl: ttl.map(serde_json::Value::from),
        }))
    }

    #[tokio::test]
    async fn test_set_and_get_handler() {
        let state = AppState::new(MemoryStore::new());

        let body = set_body("test_key", "test_value", None);
        let (status, response) = set_handler(State(state.clone()), body).await.unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(response.message, "Data stored successfully");

        let response = get_handler(State(state), Path("test_key".to_string()))
            .await
            .unwrap();
        assert_eq!(response.key, "test_key");
        assert_eq!(response.value, "test_value");
    }

    #[tokio::test]
    async fn test_set_handler_stores_envelope() {
        let store = Arc::new(MemoryStore::new());
        let state = AppState::from_shared(store.clone());

        set_handler(State(state), set_body("k", "v", Some(60)))
            .await
            .unwrap();

        let raw = store.get("k").await.unwrap();
        let envelope: Envelope = serde_json::from_str(&raw).unwrap();
        assert_eq!(envelope.value, "v");
        assert_eq!(envelope.ttl, Some(60));
        assert!(store.ttl("k").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_get_nonexistent_key() {
        let state = AppState::new(MemoryStore::new());

        let result = get_handler(State(state), Path("nonexistent".to_string())).await;
        assert_eq!(result.unwrap_err(), ApiError::NotFound);
    }

    #[tokio::test]
    async fn test_delete_handler() {
        let state = AppState::new(MemoryStore::new());
        set_handler(State(state.clone()), set_body("to_delete", "value", None))
            .await
            .unwrap();

        let response = delete_handler(State(state.clone()), Path("to_delete".to_string()))
            .await
            .unwrap();
        assert_eq!(response.message, "Key to_delete deleted successfully");

        let result = get_handler(State(state), Path("to_delete".to_string())).await;
        assert_eq!(result.unwrap_err(), ApiError::NotFound);
    }

    #[tokio::test]
    async fn test_ttl_handlers() {
        let state = AppState::new(MemoryStore::new());
        set_handler(State(state.clone()), set_body("k", "v", None))
            .await
            .unwrap();

        let response = get_ttl_handler(State(state.clone()), Path("k".to_string()))
            .await
            .unwrap();
        assert_eq!(response.ttl, None);

        let body = Ok(Json(TtlRequest {
            ttl: Some(serde_json::json!(90)),
        }));
        let response = update_ttl_handler(State(state.clone()), Path("k".to_string()), body)
            .await
            .unwrap();
        assert_eq!(response.message, "TTL updated for key k");

        let response = get_ttl_handler(State(state), Path("k".to_string()))
            .await
            .unwrap();
        assert_eq!(response.ttl, Some(90));
    }

    #[tokio::test]
    async fn test_update_ttl_missing_key() {
        let state = AppState::new(MemoryStore::new());
        let body = Ok(Json(TtlRequest {
            ttl: Some(serde_json::json!(10)),
        }));

        let result = update_ttl_handler(State(state), Path("ghost".to_string()), body).await;
        assert_eq!(result.unwrap_err(), ApiError::NotFound);
    }

    #[tokio::test]
    async fn test_keys_and_metrics_handlers() {
        let state = AppState::new(MemoryStore::new());
        set_handler(State(state.clone()), set_body("foo", "1", None))
            .await
            .unwrap();

        let response = keys_handler(State(state.clone()), Query(KeysQuery::default()))
            .await
            .unwrap();
        assert_eq!(response.keys, vec!["foo".to_string()]);

        let response = metrics_handler(State(state)).await.unwrap();
        assert!(response.total_commands_processed >= 2);
    }

    #[tokio::test]
    async fn test_handlers_with_unreachable_store() {
        // nothing listens on port 1
        let store = crate::store::RedisStore::open("redis://127.0.0.1:1/").unwrap();
        let state = AppState::new(store);

        let (status, response) = health_handler(State(state.clone())).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(response.redis, "disconnected");

        let result = metrics_handler(State(state)).await;
        assert!(matches!(result, Err(ApiError::Store(_))));
    }

    #[tokio::test]
    async fn test_set_handler_numeric_value() {
        let state = AppState::new(MemoryStore::new());
        let body = Ok(Json(SetRequest {
            key: Some("n".to_string()),
            value: Some(serde_json::json!(42)),
            ttl: None,
        }));

        set_handler(State(state.clone()), body).await.unwrap();

        let response = get_handler(State(state), Path("n".to_string()))
            .await
            .unwrap();
        assert_eq!(response.value, "42");
    }

    #[tokio::test]
    async fn test_health_handler() {
        let state = AppState::new(MemoryStore::new());
        let (status, response) = health_handler(State(state)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(response.status, "healthy");
    }

    #[tokio::test]
    async fn test_set_invalid_request() {
        let state = AppState::new(MemoryStore::new());
        let body = Ok(Json(SetRequest {
            key: Some("k".to_string()),
            ..SetRequest::default()
        }));

        let result = set_handler(State(state), body).await;
        assert_eq!(
            result.unwrap_err(),
            ApiError::InvalidRequest(INVALID_SET_REQUEST.to_string())
        );
    }
}
