//! API Module
//!
//! HTTP handlers and routing for the gateway REST API.
//!
//! # Endpoints
//! - `GET /health` - Store connectivity check
//! - `POST /data` - Store a record
//! - `GET /data/:key` - Read a record
//! - `DELETE /data/:key` - Delete a record
//! - `GET /data/:key/ttl` - Read a record's remaining TTL
//! - `PUT /data/:key/ttl` - Replace a record's TTL
//! - `GET /data/keys?pattern=*` - List keys matching a glob
//! - `GET /metrics` - Store metrics

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
