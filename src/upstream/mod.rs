//! Upstream (MCP) access.
//!
//! This module handles:
//! - Best-effort tool calls with a bounded timeout
//! - Reachability probing for the health endpoint

pub mod client;
pub mod probe;

pub use client::{UpstreamClient, UpstreamTool};
pub use probe::{probe_url, ProbeOutcome};

#[cfg(test)]
pub(crate) mod testing {
    use axum::Router;
    use tokio::net::TcpListener;

    use crate::config::Config;

    /// Nothing listens on port 1 on a test host.
    pub(crate) const UNREACHABLE_URL: &str = "http://127.0.0.1:1/mcp";

    /// Serve `router` on an ephemeral port and return its `/mcp` base URL.
    pub(crate) async fn spawn_upstream(router: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/mcp", addr)
    }

    /// Config pointing at `url` with short timeouts and no metrics.
    pub(crate) fn config_for(url: &str) -> Config {
        Config {
            mcp_url: url.to_string(),
            mcp_timeout_ms: 500,
            mcp_probe_timeout_ms: 500,
            metrics_enabled: false,
            ..Config::default()
        }
    }
}
