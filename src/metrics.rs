//! Prometheus metrics for upstream calls and mock fallbacks.
//!
//! Recording is a no-op until a recorder is installed, so library code and
//! tests can call these helpers unconditionally.

use std::time::{Duration, Instant};

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::error::UpstreamError;
use crate::upstream::UpstreamTool;

// === Metric Name Constants ===

/// Upstream call counter metric name.
pub const METRIC_UPSTREAM_REQUESTS: &str = "upstream_requests_total";
/// Upstream call latency metric name.
pub const METRIC_UPSTREAM_LATENCY: &str = "upstream_request_latency_ms";
/// Mock fallback counter metric name.
pub const METRIC_MOCK_FALLBACKS: &str = "mock_fallbacks_total";
/// Probe counter metric name.
pub const METRIC_UPSTREAM_PROBES: &str = "upstream_probes_total";

/// Install the global Prometheus recorder and describe all metrics.
/// Call this once at startup.
pub fn install_prometheus() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    init_metrics();
    Ok(handle)
}

/// Run recorder upkeep every `period` so histograms are drained even when
/// `/metrics` is never scraped. The task runs until aborted.
pub fn spawn_upkeep(handle: PrometheusHandle, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        loop {
            interval.tick().await;
            handle.run_upkeep();
        }
    })
}

/// Register metric descriptions.
pub fn init_metrics() {
    describe_counter!(
        METRIC_UPSTREAM_REQUESTS,
        "Upstream tool calls by tool and outcome"
    );
    describe_histogram!(
        METRIC_UPSTREAM_LATENCY,
        "Upstream tool call latency in milliseconds"
    );
    describe_counter!(
        METRIC_MOCK_FALLBACKS,
        "Responses served from mock data by tool"
    );
    describe_counter!(
        METRIC_UPSTREAM_PROBES,
        "Upstream reachability probes by outcome"
    );

    debug!("Metrics initialized");
}

/// Record one upstream call. `error` is `None` on success.
pub fn record_upstream_call(tool: UpstreamTool, start: Instant, error: Option<&UpstreamError>) {
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    let outcome = error.map(UpstreamError::kind).unwrap_or("ok");

    histogram!(METRIC_UPSTREAM_LATENCY, "tool" => tool.to_string()).record(latency_ms);
    counter!(METRIC_UPSTREAM_REQUESTS, "tool" => tool.to_string(), "outcome" => outcome)
        .increment(1);
}

/// Increment the mock fallback counter.
pub fn inc_mock_fallbacks(tool: UpstreamTool) {
    counter!(METRIC_MOCK_FALLBACKS, "tool" => tool.to_string()).increment(1);
}

/// Record a probe result.
pub fn record_probe(reachable: bool) {
    let outcome = if reachable { "reachable" } else { "unreachable" };
    counter!(METRIC_UPSTREAM_PROBES, "outcome" => outcome).increment(1);
}
