//! HTTP API module for the airline endpoints, health, and metrics.

pub mod handlers;
pub mod routes;

pub use handlers::AppState;
pub use routes::create_router;
