//! HTTP API route definitions.

use std::path::Path;

use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use super::handlers::{
    booking_details, city_guide, flight_status, health, prometheus, promotions, search_flights,
    AppState,
};

/// Create the API router. Unmatched paths are served from `static_dir`.
pub fn create_router(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    Router::new()
        // Airline endpoints
        .route("/api/search-flights", post(search_flights))
        .route("/api/flight-status", post(flight_status))
        .route("/api/booking-details", post(booking_details))
        .route("/api/promotions", post(promotions))
        .route("/api/city-guide", post(city_guide))
        // Health and metrics
        .route("/api/health", get(health))
        .route("/metrics", get(prometheus))
        .fallback_service(ServeDir::new(static_dir.as_ref()))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
