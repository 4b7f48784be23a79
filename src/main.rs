//! KV Gateway - A thin HTTP gateway over a key-value store
//!
//! Binary entry point: loads configuration, builds the store client once and
//! serves the API until Ctrl+C or SIGTERM.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kv_gateway::{
    api::create_router,
    config::{Config, StoreBackend},
    store::{MemoryStore, RedisStore, SharedStore},
    tasks::spawn_cleanup_task,
    AppState,
};

/// Main entry point for the gateway.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the process-wide store client
/// 4. Create Axum router with all endpoints
/// 5. Start HTTP server on configured port
/// 6. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kv_gateway=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting KV Gateway");

    let config = Config::from_env();
    info!(
        "Configuration loaded: backend={}, redis={}:{}, port={}",
        config.store_backend, config.redis_host, config.redis_port, config.server_port
    );

    let (store, cleanup_handle) = build_store(&config)?;
    info!("Store client initialized");

    let app = create_router(AppState::from_shared(store));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    // The router, and with it the store client, is dropped when serve returns
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cleanup_handle))
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Builds the store selected by the configuration.
///
/// The in-process store also gets its expiry sweep task.
fn build_store(config: &Config) -> anyhow::Result<(SharedStore, Option<JoinHandle<()>>)> {
    match config.store_backend {
        StoreBackend::Redis => {
            let url = config.redis_url();
            let store = RedisStore::open(&url)
                .with_context(|| format!("invalid Redis address {}", url))?;
            let shared: SharedStore = Arc::new(store);
            Ok((shared, None))
        }
        StoreBackend::Memory => {
            warn!("Using the in-process store, data will not survive a restart");
            let store = Arc::new(MemoryStore::new());
            let handle = spawn_cleanup_task(store.clone(), config.cleanup_interval);
            let shared: SharedStore = store;
            Ok((shared, Some(handle)))
        }
    }
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the sweep task if one is running.
async fn shutdown_signal(cleanup_handle: Option<JoinHandle<()>>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    if let Some(handle) = cleanup_handle {
        handle.abort();
        warn!("Expiry sweep task aborted");
    }
}
