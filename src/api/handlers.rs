//! HTTP API handlers.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::airline::{
    mock, BookingDetailsRequest, CityGuideRequest, DataSource, Envelope, FlightStatusRequest,
    HealthStatus, McpStatus, PromotionsRequest, SearchFlightsRequest,
};
use crate::config::Config;
use crate::error::{ApiError, AppError, UpstreamError};
use crate::metrics;
use crate::upstream::{ProbeOutcome, UpstreamClient, UpstreamTool};
use crate::utils::timestamp;

/// Application state shared with handlers.
#[derive(Clone)]
pub struct AppState {
    /// Upstream client, absent when the upstream is disabled.
    upstream: Option<UpstreamClient>,
    /// Outcome of the most recent probe.
    mcp_connected: Arc<AtomicBool>,
    /// Prometheus handle for `/metrics`.
    metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create new app state from config.
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let upstream = if config.mcp_enabled {
            Some(UpstreamClient::new(config)?)
        } else {
            None
        };

        Ok(Self {
            upstream,
            mcp_connected: Arc::new(AtomicBool::new(false)),
            metrics: None,
        })
    }

    /// Attach a Prometheus handle.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    /// Upstream client, if enabled.
    pub fn upstream(&self) -> Option<&UpstreamClient> {
        self.upstream.as_ref()
    }

    /// Set connectivity flag.
    pub fn set_mcp_connected(&self, connected: bool) {
        self.mcp_connected.store(connected, Ordering::SeqCst);
    }

    /// Check connectivity flag.
    pub fn is_mcp_connected(&self) -> bool {
        self.mcp_connected.load(Ordering::SeqCst)
    }

    /// Probe the upstream and store the result in the connectivity flag.
    pub async fn refresh_connectivity(&self) -> ProbeOutcome {
        let outcome = match &self.upstream {
            Some(upstream) => upstream.probe().await,
            None => ProbeOutcome::Unreachable {
                reason: UpstreamError::Disabled.to_string(),
            },
        };

        self.set_mcp_connected(outcome.is_reachable());
        outcome
    }
}

/// JSON body extractor that ignores the content type and reports failures
/// as [`ApiError`].
///
/// Only an object populates fields; an empty body or any other JSON value
/// (array, string, number, null) yields `T::default()`.
#[derive(Debug, Clone, Default)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(JsonBody(T::default()));
        }

        match serde_json::from_slice::<Value>(&bytes).map_err(ApiError::InvalidJson)? {
            object @ Value::Object(_) => serde_json::from_value(object)
                .map(JsonBody)
                .map_err(ApiError::InvalidJson),
            _ => Ok(JsonBody(T::default())),
        }
    }
}

/// Tag an upstream payload as live.
///
/// Objects pass through with `success` and `timestamp` added when missing.
/// `source` always reads `"live"`; an upstream `source` value moves to
/// `upstreamSource`. Anything else is returned under `data`.
pub fn live_response(payload: Value) -> Value {
    match payload {
        Value::Object(mut map) => {
            if let Some(upstream_source) = map.remove("source") {
                map.entry("upstreamSource").or_insert(upstream_source);
            }
            map.insert("source".to_string(), json!(DataSource::Live));
            map.entry("success").or_insert(Value::Bool(true));
            map.entry("timestamp")
                .or_insert_with(|| Value::String(timestamp()));
            Value::Object(map)
        }
        other => json!({
            "success": true,
            "data": other,
            "source": DataSource::Live,
            "timestamp": timestamp(),
        }),
    }
}

/// One upstream attempt, else the mock payload.
async fn proxy_or_mock<Req, Body>(
    state: &AppState,
    tool: UpstreamTool,
    req: &Req,
    mock: impl FnOnce(&Req) -> Body,
) -> Result<Json<Value>, ApiError>
where
    Req: Serialize,
    Body: Serialize,
{
    let attempt = match &state.upstream {
        Some(upstream) => upstream.call(tool, req).await,
        None => Err(UpstreamError::Disabled),
    };

    match attempt {
        Ok(payload) => return Ok(Json(live_response(payload))),
        Err(e) if state.is_mcp_connected() => {
            warn!(%tool, error = %e, "upstream unavailable, serving mock data");
        }
        Err(e) => {
            debug!(%tool, error = %e, "serving mock data");
        }
    }

    metrics::inc_mock_fallbacks(tool);

    let body = serde_json::to_value(Envelope::mock(mock(req))).map_err(ApiError::Serialization)?;
    Ok(Json(body))
}

/// `POST /api/search-flights`.
pub async fn search_flights(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<SearchFlightsRequest>,
) -> Result<Json<Value>, ApiError> {
    proxy_or_mock(&state, UpstreamTool::SearchFlights, &req, mock::search_flights).await
}

/// `POST /api/flight-status`.
pub async fn flight_status(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<FlightStatusRequest>,
) -> Result<Json<Value>, ApiError> {
    proxy_or_mock(&state, UpstreamTool::FlightStatus, &req, mock::flight_status).await
}

/// `POST /api/booking-details`.
pub async fn booking_details(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<BookingDetailsRequest>,
) -> Result<Json<Value>, ApiError> {
    proxy_or_mock(&state, UpstreamTool::BookingDetails, &req, mock::booking_details).await
}

/// `POST /api/promotions`.
pub async fn promotions(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<PromotionsRequest>,
) -> Result<Json<Value>, ApiError> {
    proxy_or_mock(&state, UpstreamTool::Promotions, &req, mock::promotions).await
}

/// `POST /api/city-guide`.
pub async fn city_guide(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CityGuideRequest>,
) -> Result<Json<Value>, ApiError> {
    proxy_or_mock(&state, UpstreamTool::CityGuide, &req, mock::city_guide).await
}

/// Health check handler - always returns 200.
pub async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    let outcome = state.refresh_connectivity().await;

    Json(HealthStatus {
        status: "operational",
        mcp: McpStatus::from(outcome.is_reachable()),
        timestamp: timestamp(),
    })
}

/// Prometheus exposition, 404 when metrics are disabled.
pub async fn prometheus(State(state): State<AppState>) -> Response {
    match &state.metrics {
        Some(handle) => (StatusCode::OK, handle.render()).into_response(),
        None => (StatusCode::NOT_FOUND, "metrics disabled").into_response(),
    }
}
