//! Upstream reachability probe.

use std::fmt;
use std::time::{Duration, Instant};

use tracing::{debug, instrument};
use url::Url;

use crate::metrics;

/// Result of a single reachability check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The upstream answered with a non-5xx status.
    Reachable {
        /// HTTP status returned.
        status: u16,
        /// Round trip in milliseconds.
        latency_ms: u64,
    },
    /// Network error, timeout, or a 5xx answer.
    Unreachable {
        /// What went wrong.
        reason: String,
    },
}

impl ProbeOutcome {
    /// Whether the upstream should be treated as connected.
    pub fn is_reachable(&self) -> bool {
        matches!(self, ProbeOutcome::Reachable { .. })
    }
}

impl fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeOutcome::Reachable { status, latency_ms } => {
                write!(f, "reachable (HTTP {status}, {latency_ms}ms)")
            }
            ProbeOutcome::Unreachable { reason } => write!(f, "unreachable: {reason}"),
        }
    }
}

/// GET `url` once with `timeout`.
///
/// Any answer below 500 counts as reachable, 4xx included.
#[instrument(skip(http), fields(url = %url))]
pub async fn probe_url(http: &reqwest::Client, url: &Url, timeout: Duration) -> ProbeOutcome {
    let start = Instant::now();

    let outcome = match http.get(url.clone()).timeout(timeout).send().await {
        Ok(response) if response.status().is_server_error() => ProbeOutcome::Unreachable {
            reason: format!("HTTP {}", response.status()),
        },
        Ok(response) => ProbeOutcome::Reachable {
            status: response.status().as_u16(),
            latency_ms: start.elapsed().as_millis() as u64,
        },
        Err(e) if e.is_timeout() => ProbeOutcome::Unreachable {
            reason: format!("timed out after {}ms", timeout.as_millis()),
        },
        Err(e) => ProbeOutcome::Unreachable {
            reason: e.to_string(),
        },
    };

    metrics::record_probe(outcome.is_reachable());
    debug!(%outcome, "probe finished");

    outcome
}
