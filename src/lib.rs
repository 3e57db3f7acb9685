//! Airline dashboard API.
//!
//! A thin HTTP facade over an airline data service ("MCP"). Every data route
//! makes one best-effort upstream call and answers with mock data when that
//! call fails:
//!
//! ```text
//! POST /api/search-flights ──► upstream <base>/search-flights
//!                                 │
//!                    ok ◄─────────┴────────► timeout / refused / non-2xx
//!                    │                        │
//!            payload, source=live      mock payload, source=mock
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`airline`]: Request/response payloads and mock data
//! - [`upstream`]: Upstream client and reachability probe
//! - [`api`]: HTTP routes and handlers
//! - [`metrics`]: Prometheus metrics
//! - [`utils`]: Utility functions

pub mod airline;
pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod upstream;
pub mod utils;

pub use config::Config;
pub use error::AppError;
