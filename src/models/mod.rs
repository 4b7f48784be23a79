//! Request and Response models for the gateway API
//!
//! DTOs for HTTP bodies plus the envelope written to the store.

pub mod envelope;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use envelope::Envelope;
pub use requests::{KeysQuery, SetRequest, TtlRequest, WriteRecord};
pub use responses::{
    ErrorResponse, GetResponse, HealthResponse, KeysResponse, MessageResponse, MetricsResponse,
    TtlResponse,
};
