//! service-core: shared infrastructure for the itinerary workspace.
pub mod config;
pub mod error;
pub mod middleware;
pub mod observability;
pub mod response;

pub use axum;
pub use serde_json;
pub use tower_http;
pub use tracing;
