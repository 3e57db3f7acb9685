//! Unified error types for the dashboard API.

use axum::{
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::upstream::UpstreamTool;

/// Unified error type for startup and CLI paths.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration loaded but failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Upstream client error.
    #[error("upstream error: {0}")]
    Upstream(#[from] UpstreamError),

    /// HTTP client error.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Upstream (MCP) failures.
///
/// Every variant means "upstream unavailable" to the handlers, which answer
/// with mock data instead.
#[derive(Error, Debug)]
pub enum UpstreamError {
    /// The upstream is disabled by configuration.
    #[error("upstream disabled")]
    Disabled,

    /// The base URL cannot address tool endpoints.
    #[error("invalid upstream url {url}: {reason}")]
    InvalidUrl {
        /// Offending URL.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// No response within the configured timeout.
    #[error("{tool} timed out after {timeout_ms}ms")]
    Timeout {
        /// Tool that was called.
        tool: UpstreamTool,
        /// Timeout that elapsed.
        timeout_ms: u64,
    },

    /// Connection could not be established.
    #[error("{tool} connection failed: {reason}")]
    Connect {
        /// Tool that was called.
        tool: UpstreamTool,
        /// Underlying failure.
        reason: String,
    },

    /// Upstream answered with a non-success status.
    #[error("{tool} returned HTTP {status}")]
    Status {
        /// Tool that was called.
        tool: UpstreamTool,
        /// HTTP status code.
        status: u16,
    },

    /// Response body was not JSON.
    #[error("{tool} returned an unreadable body: {reason}")]
    InvalidBody {
        /// Tool that was called.
        tool: UpstreamTool,
        /// Parse failure.
        reason: String,
    },

    /// Any other transport failure.
    #[error("{tool} request failed: {source}")]
    Request {
        /// Tool that was called.
        tool: UpstreamTool,
        /// Underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },
}

impl UpstreamError {
    /// Classify a transport error for `tool`.
    pub fn from_reqwest(tool: UpstreamTool, timeout_ms: u64, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            UpstreamError::Timeout { tool, timeout_ms }
        } else if err.is_connect() {
            UpstreamError::Connect {
                tool,
                reason: err.to_string(),
            }
        } else {
            UpstreamError::Request { tool, source: err }
        }
    }

    /// Short label used as a metrics outcome.
    pub fn kind(&self) -> &'static str {
        match self {
            UpstreamError::Disabled => "disabled",
            UpstreamError::InvalidUrl { .. } => "invalid_url",
            UpstreamError::Timeout { .. } => "timeout",
            UpstreamError::Connect { .. } => "connect",
            UpstreamError::Status { .. } => "status",
            UpstreamError::InvalidBody { .. } => "invalid_body",
            UpstreamError::Request { .. } => "request",
        }
    }
}

/// Failure inside a route handler, surfaced as HTTP 500.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request body could not be read.
    #[error("failed to read request body: {0}")]
    Body(#[from] BytesRejection),

    /// Request body is not valid JSON for the route.
    #[error("invalid JSON body: {0}")]
    InvalidJson(#[source] serde_json::Error),

    /// Response could not be serialized.
    #[error("failed to build response: {0}")]
    Serialization(#[source] serde_json::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "handler failed");

        let body = Json(json!({
            "success": false,
            "error": self.to_string(),
        }));

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_error_messages_name_the_tool() {
        let err = UpstreamError::Status {
            tool: UpstreamTool::FlightStatus,
            status: 502,
        };
        assert_eq!(err.to_string(), "flight-status returned HTTP 502");
        assert_eq!(err.kind(), "status");

        let err = UpstreamError::Timeout {
            tool: UpstreamTool::SearchFlights,
            timeout_ms: 5000,
        };
        assert_eq!(err.to_string(), "search-flights timed out after 5000ms");

        assert_eq!(UpstreamError::Disabled.kind(), "disabled");
    }

    #[test]
    fn config_failures_convert_to_app_error() {
        let config = crate::Config {
            mcp_timeout_ms: 0,
            ..crate::Config::default()
        };
        let err = AppError::InvalidConfig(config.validate().unwrap_err());
        assert!(err.to_string().starts_with("invalid configuration: "));

        let missing = envy::from_iter::<_, RequiredPort>(Vec::<(String, String)>::new()).unwrap_err();
        let err: AppError = missing.into();
        assert!(matches!(err, AppError::Config(_)), "{err:?}");
    }

    #[derive(Debug, serde::Deserialize)]
    #[allow(dead_code)]
    struct RequiredPort {
        port: u16,
    }

    #[tokio::test]
    async fn api_error_renders_500_with_failure_body() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let response = ApiError::InvalidJson(parse_err).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().starts_with("invalid JSON body"));
    }
}
