//! Request bodies and response payloads for the airline endpoints.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::Display;

/// Where a response payload came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DataSource {
    /// Passed through from the upstream.
    Live,
    /// Hardcoded fallback data.
    Mock,
}

/// Upstream connectivity as reported by `/api/health`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum McpStatus {
    /// Last probe reached the upstream.
    Connected,
    /// Upstream unreachable or disabled; data routes serve mock data.
    FallbackMode,
}

impl From<bool> for McpStatus {
    fn from(connected: bool) -> Self {
        if connected {
            McpStatus::Connected
        } else {
            McpStatus::FallbackMode
        }
    }
}

// === Requests ===
//
// Fields are kept as raw JSON so absent values echo back as `null` and
// whatever the caller sent (string or number) is returned as-is.

/// `POST /api/search-flights` body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchFlightsRequest {
    pub origin: Value,
    pub destination: Value,
    pub date: Value,
    pub passengers: Value,
}

/// `POST /api/flight-status` body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FlightStatusRequest {
    pub flight_number: Value,
    pub date: Value,
}

/// `POST /api/booking-details` body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BookingDetailsRequest {
    pub pnr: Value,
    pub surname: Value,
}

/// `POST /api/promotions` body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PromotionsRequest {
    pub country: Value,
}

/// `POST /api/city-guide` body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CityGuideRequest {
    pub city: Value,
}

// === Responses ===

/// Common wrapper for every data route response.
#[derive(Debug, Clone, Serialize)]
pub struct Envelope<T> {
    /// Always true; failures go through `ApiError`.
    pub success: bool,
    /// Route specific payload, flattened into the top level.
    #[serde(flatten)]
    pub body: T,
    /// Live or mock.
    pub source: DataSource,
    /// RFC 3339 UTC response time.
    pub timestamp: String,
}

impl<T> Envelope<T> {
    /// Wrap a mock payload.
    pub fn mock(body: T) -> Self {
        Self {
            success: true,
            body,
            source: DataSource::Mock,
            timestamp: crate::utils::timestamp(),
        }
    }
}

/// A bookable flight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightOffer {
    pub id: String,
    pub number: String,
    /// Local departure time ("09:00").
    pub departure: String,
    /// Local arrival time.
    pub arrival: String,
    pub duration: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// ISO 4217 code.
    pub currency: String,
    pub airline: String,
    pub aircraft: String,
    /// Seats remaining.
    pub seats: u32,
    #[serde(rename = "class")]
    pub cabin_class: String,
}

/// Search results echoing the query.
#[derive(Debug, Clone, Serialize)]
pub struct FlightSearch {
    pub origin: Value,
    pub destination: Value,
    pub date: Value,
    pub passengers: Value,
    pub flights: Vec<FlightOffer>,
}

/// Operational state of a flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum FlightState {
    #[serde(rename = "ON TIME")]
    #[strum(serialize = "ON TIME")]
    OnTime,
    #[serde(rename = "DELAYED")]
    #[strum(serialize = "DELAYED")]
    Delayed,
    #[serde(rename = "BOARDING")]
    #[strum(serialize = "BOARDING")]
    Boarding,
    #[serde(rename = "DEPARTED")]
    #[strum(serialize = "DEPARTED")]
    Departed,
    #[serde(rename = "LANDED")]
    #[strum(serialize = "LANDED")]
    Landed,
    #[serde(rename = "CANCELLED")]
    #[strum(serialize = "CANCELLED")]
    Cancelled,
}

/// One end of a flight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusEndpoint {
    /// IATA airport code.
    pub airport: String,
    pub city: String,
    pub scheduled: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated: Option<String>,
    pub gate: String,
}

/// Live status of a single flight.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightStatus {
    pub flight: Value,
    pub date: Value,
    pub status: FlightState,
    pub departure: StatusEndpoint,
    pub arrival: StatusEndpoint,
    pub aircraft: String,
    pub operating_airline: String,
}

/// A flown or upcoming segment inside a booking.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookedSegment {
    pub number: String,
    pub route: String,
    pub date: String,
    pub departure: String,
    pub arrival: String,
    pub seat: String,
    pub seat_class: String,
    pub booking_reference: Value,
}

/// Passenger on a booking.
#[derive(Debug, Clone, Serialize)]
pub struct BookedPassenger {
    pub name: Value,
    /// Passenger type code (ADT, CHD, INF).
    #[serde(rename = "type")]
    pub kind: String,
}

/// Baggage allowance.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Baggage {
    pub checked_bags: u32,
    pub bag_weight: u32,
    pub unit: String,
    pub carry: String,
}

/// A booking retrieved by PNR.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub pnr: Value,
    pub passenger: Value,
    pub booking_status: String,
    pub booking_date: String,
    pub flights: Vec<BookedSegment>,
    pub passengers: Vec<BookedPassenger>,
    pub baggage: Baggage,
    pub miles_credited: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_price: Decimal,
    pub currency: String,
}

/// What a promotion gives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Reward {
    /// Price reduction ("25% OFF").
    Discount(String),
    /// Loyalty bonus ("3x miles").
    Bonus(String),
}

/// A marketing offer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Promotion {
    pub id: u32,
    pub name: String,
    #[serde(flatten)]
    pub reward: Reward,
    pub description: String,
    pub valid_from: String,
    pub valid_until: String,
    pub code: String,
}

/// Offers for a market.
#[derive(Debug, Clone, Serialize)]
pub struct PromotionList {
    pub country: Value,
    pub offers: Vec<Promotion>,
}

/// One entry in a city guide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Highlight {
    pub title: &'static str,
    pub description: &'static str,
}

/// Destination information.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CityGuide {
    pub city: Value,
    pub highlights: Vec<Highlight>,
    pub flights: String,
    pub timezone: String,
    pub currency: String,
    pub visa_info: String,
}

/// `GET /api/health` body.
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    /// Always "operational".
    pub status: &'static str,
    pub mcp: McpStatus,
    pub timestamp: String,
}
