//! Airline domain payloads.
//!
//! This module handles:
//! - Request bodies and response records
//! - Mock data served when the upstream is unavailable

pub mod mock;
pub mod types;

pub use types::{
    BookingDetailsRequest, CityGuideRequest, DataSource, Envelope, FlightStatusRequest,
    HealthStatus, McpStatus, PromotionsRequest, SearchFlightsRequest,
};
