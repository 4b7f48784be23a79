//! KV Gateway - A thin HTTP gateway over a key-value store
//!
//! Exposes record CRUD, TTL management, key listing and store metrics over
//! HTTP, backed by Redis (or an in-process store for local runs).

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use tasks::spawn_cleanup_task;
