//! Upstream (MCP) API client.

use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::RequestBuilder;
use serde::Serialize;
use serde_json::Value;
use strum::{AsRefStr, Display, EnumIter};
use tokio::sync::RwLock;
use tracing::{debug, instrument};
use url::Url;

use crate::config::Config;
use crate::error::{AppError, UpstreamError};
use crate::metrics;

use super::probe::{probe_url, ProbeOutcome};

/// Upstream operation, addressed as `<base>/<tool>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumIter)]
#[strum(serialize_all = "kebab-case")]
pub enum UpstreamTool {
    SearchFlights,
    FlightStatus,
    BookingDetails,
    Promotions,
    CityGuide,
}

/// Upstream client: one POST per call, bounded by the configured timeout.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    /// HTTP client for API requests.
    http: reqwest::Client,
    /// Base URL; tool names are appended as a path segment.
    base_url: Url,
    /// Per-call timeout.
    timeout: Duration,
    /// Reachability probe timeout.
    probe_timeout: Duration,
    /// Bearer token shared by every clone of this client.
    token: Arc<RwLock<Option<String>>>,
}

impl UpstreamClient {
    /// Create a client from config.
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let base_url = Url::parse(&config.mcp_url).map_err(|e| UpstreamError::InvalidUrl {
            url: config.mcp_url.clone(),
            reason: e.to_string(),
        })?;

        if base_url.cannot_be_a_base() {
            return Err(UpstreamError::InvalidUrl {
                url: config.mcp_url.clone(),
                reason: "url cannot carry a path".to_string(),
            }
            .into());
        }

        let timeout = config.mcp_timeout();
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(2)))
            .tcp_keepalive(Duration::from_secs(30))
            .pool_idle_timeout(Duration::from_secs(90))
            .build()?;

        Ok(Self {
            http,
            base_url,
            timeout,
            probe_timeout: config.mcp_probe_timeout(),
            token: Arc::new(RwLock::new(config.token())),
        })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// URL for a tool.
    pub fn endpoint(&self, tool: UpstreamTool) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(tool.as_ref());
        }
        url
    }

    /// Replace the cached bearer token.
    pub async fn set_token(&self, token: Option<String>) {
        *self.token.write().await = token;
    }

    /// Whether a bearer token is cached.
    pub async fn has_token(&self) -> bool {
        self.token.read().await.is_some()
    }

    /// Call `tool` with `body` and return the upstream's JSON verbatim.
    #[instrument(skip(self, body), fields(tool = %tool))]
    pub async fn call<B>(&self, tool: UpstreamTool, body: &B) -> Result<Value, UpstreamError>
    where
        B: Serialize + ?Sized,
    {
        let start = Instant::now();

        let mut request = self.http.post(self.endpoint(tool)).json(body);
        let token = self.token.read().await.clone();
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        let result = self.send(tool, request).await;
        metrics::record_upstream_call(tool, start, result.as_ref().err());

        if let Err(e) = &result {
            debug!(error = %e, "upstream call failed");
        }

        result
    }

    async fn send(&self, tool: UpstreamTool, request: RequestBuilder) -> Result<Value, UpstreamError> {
        let timeout_ms = self.timeout.as_millis() as u64;

        let response = request
            .send()
            .await
            .map_err(|e| UpstreamError::from_reqwest(tool, timeout_ms, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status {
                tool,
                status: status.as_u16(),
            });
        }

        response.json::<Value>().await.map_err(|e| {
            if e.is_timeout() {
                UpstreamError::Timeout { tool, timeout_ms }
            } else {
                UpstreamError::InvalidBody {
                    tool,
                    reason: e.to_string(),
                }
            }
        })
    }

    /// Check whether the upstream answers at all.
    pub async fn probe(&self) -> ProbeOutcome {
        probe_url(&self.http, &self.base_url, self.probe_timeout).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upstream::testing::{config_for, spawn_upstream, UNREACHABLE_URL};
    use axum::{
        http::{HeaderMap, StatusCode},
        routing::post,
        Json, Router,
    };
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use strum::IntoEnumIterator;

    #[test]
    fn tool_names_are_kebab_case() {
        let names: Vec<String> = UpstreamTool::iter().map(|t| t.to_string()).collect();
        assert_eq!(
            names,
            ["search-flights", "flight-status", "booking-details", "promotions", "city-guide"]
        );
    }

    #[test]
    fn endpoint_appends_tool_to_base_path() {
        let client = UpstreamClient::new(&config_for("https://mcp.example.com/mcp")).unwrap();
        assert_eq!(
            client.endpoint(UpstreamTool::CityGuide).as_str(),
            "https://mcp.example.com/mcp/city-guide"
        );

        let client = UpstreamClient::new(&config_for("https://mcp.example.com/mcp/")).unwrap();
        assert_eq!(
            client.endpoint(UpstreamTool::Promotions).as_str(),
            "https://mcp.example.com/mcp/promotions"
        );
    }

    #[test]
    fn new_rejects_unusable_url() {
        assert!(UpstreamClient::new(&config_for("mailto:ops@example.com")).is_err());
        assert!(UpstreamClient::new(&config_for("::nope::")).is_err());
    }

    #[tokio::test]
    async fn call_returns_payload_verbatim() {
        let router = Router::new().route(
            "/mcp/promotions",
            post(|Json(body): Json<Value>| async move {
                Json(json!({ "echo": body, "offers": [{ "code": "LIVE1" }] }))
            }),
        );
        let url = spawn_upstream(router).await;
        let client = UpstreamClient::new(&config_for(&url)).unwrap();

        let payload = client
            .call(UpstreamTool::Promotions, &json!({ "country": "TR" }))
            .await
            .unwrap();

        assert_eq!(
            payload,
            json!({ "echo": { "country": "TR" }, "offers": [{ "code": "LIVE1" }] })
        );
    }

    #[tokio::test]
    async fn call_attaches_bearer_token_when_cached() {
        let router = Router::new().route(
            "/mcp/flight-status",
            post(|headers: HeaderMap| async move {
                let auth = headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string);
                Json(json!({ "auth": auth }))
            }),
        );
        let url = spawn_upstream(router).await;
        let client = UpstreamClient::new(&config_for(&url)).unwrap();

        let payload = client.call(UpstreamTool::FlightStatus, &json!({})).await.unwrap();
        assert_eq!(payload["auth"], Value::Null);

        client.set_token(Some("secret".to_string())).await;
        assert!(client.has_token().await);

        let payload = client.call(UpstreamTool::FlightStatus, &json!({})).await.unwrap();
        assert_eq!(payload["auth"], json!("Bearer secret"));
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let router = Router::new().route(
            "/mcp/search-flights",
            post(|| async { (StatusCode::BAD_GATEWAY, "down") }),
        );
        let url = spawn_upstream(router).await;
        let client = UpstreamClient::new(&config_for(&url)).unwrap();

        let err = client
            .call(UpstreamTool::SearchFlights, &json!({}))
            .await
            .unwrap_err();

        assert!(matches!(err, UpstreamError::Status { status: 502, .. }), "{err:?}");
    }

    #[tokio::test]
    async fn non_json_body_is_an_error() {
        let router = Router::new().route("/mcp/city-guide", post(|| async { "plain text" }));
        let url = spawn_upstream(router).await;
        let client = UpstreamClient::new(&config_for(&url)).unwrap();

        let err = client.call(UpstreamTool::CityGuide, &json!({})).await.unwrap_err();
        assert!(matches!(err, UpstreamError::InvalidBody { .. }), "{err:?}");
    }

    #[tokio::test]
    async fn slow_upstream_times_out() {
        let router = Router::new().route(
            "/mcp/booking-details",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Json(json!({}))
            }),
        );
        let url = spawn_upstream(router).await;
        let client = UpstreamClient::new(&config_for(&url)).unwrap();

        let err = client
            .call(UpstreamTool::BookingDetails, &json!({}))
            .await
            .unwrap_err();

        assert!(matches!(err, UpstreamError::Timeout { .. }), "{err:?}");
    }

    #[tokio::test]
    async fn unreachable_upstream_is_an_error() {
        let client = UpstreamClient::new(&config_for(UNREACHABLE_URL)).unwrap();
        assert!(client.call(UpstreamTool::Promotions, &json!({})).await.is_err());
    }
}
