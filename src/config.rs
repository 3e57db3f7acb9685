//! Application configuration loaded from environment variables.

use std::time::Duration;

use serde::Deserialize;
use url::Url;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Server Configuration ===
    /// HTTP server port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory served as static assets (router fallback).
    #[serde(default = "default_static_dir")]
    pub static_dir: String,

    // === Upstream (MCP) ===
    /// Upstream base URL. Tools are addressed as `<mcp_url>/<tool>`.
    #[serde(default = "default_mcp_url")]
    pub mcp_url: String,

    /// Set to false to serve mock data only and never contact the upstream.
    #[serde(default = "default_true")]
    pub mcp_enabled: bool,

    /// Pre-obtained bearer token for upstream calls.
    #[serde(default)]
    pub mcp_token: Option<String>,

    /// Per-call upstream timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub mcp_timeout_ms: u64,

    /// Reachability probe timeout in milliseconds.
    #[serde(default = "default_probe_timeout_ms")]
    pub mcp_probe_timeout_ms: u64,

    // === Observability ===
    /// Install the Prometheus recorder and expose `/metrics`.
    #[serde(default = "default_true")]
    pub metrics_enabled: bool,

    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,

    /// Enable verbose logging.
    #[serde(default)]
    pub verbose: bool,
}

fn default_port() -> u16 {
    3000
}

fn default_static_dir() -> String {
    ".".to_string()
}

fn default_mcp_url() -> String {
    "https://mcp.turkishtechlab.com/mcp".to_string()
}

fn default_true() -> bool {
    true
}

fn default_timeout_ms() -> u64 {
    5000
}

fn default_probe_timeout_ms() -> u64 {
    2000
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            static_dir: default_static_dir(),
            mcp_url: default_mcp_url(),
            mcp_enabled: true,
            mcp_token: None,
            mcp_timeout_ms: default_timeout_ms(),
            mcp_probe_timeout_ms: default_probe_timeout_ms(),
            metrics_enabled: true,
            rust_log: default_log_level(),
            verbose: false,
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), String> {
        if self.mcp_enabled {
            let url = Url::parse(&self.mcp_url)
                .map_err(|e| format!("MCP_URL is not a valid URL: {}", e))?;

            if !matches!(url.scheme(), "http" | "https") {
                return Err(format!("MCP_URL must be http or https, got {}", url.scheme()));
            }
        }

        if self.mcp_timeout_ms == 0 {
            return Err("MCP_TIMEOUT_MS must be greater than 0".to_string());
        }

        if self.mcp_probe_timeout_ms == 0 {
            return Err("MCP_PROBE_TIMEOUT_MS must be greater than 0".to_string());
        }

        Ok(())
    }

    /// Upstream call timeout.
    pub fn mcp_timeout(&self) -> Duration {
        Duration::from_millis(self.mcp_timeout_ms)
    }

    /// Probe timeout.
    pub fn mcp_probe_timeout(&self) -> Duration {
        Duration::from_millis(self.mcp_probe_timeout_ms)
    }

    /// Token with blank values treated as absent.
    pub fn token(&self) -> Option<String> {
        self.mcp_token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values_are_sensible() {
        let config = Config::default();
        assert_eq!(config.port, 3000);
        assert_eq!(config.static_dir, ".");
        assert_eq!(config.mcp_timeout(), Duration::from_secs(5));
        assert_eq!(config.mcp_probe_timeout(), Duration::from_secs(2));
        assert!(config.mcp_enabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_malformed_url() {
        let config = Config {
            mcp_url: "not a url".to_string(),
            ..Config::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_non_http_scheme() {
        let config = Config {
            mcp_url: "ftp://mcp.example.com".to_string(),
            ..Config::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_ignores_url_when_upstream_disabled() {
        let config = Config {
            mcp_url: String::new(),
            mcp_enabled: false,
            ..Config::default()
        };

        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let config = Config {
            mcp_timeout_ms: 0,
            ..Config::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn blank_token_is_treated_as_absent() {
        let config = Config {
            mcp_token: Some("   ".to_string()),
            ..Config::default()
        };
        assert_eq!(config.token(), None);

        let config = Config {
            mcp_token: Some("abc".to_string()),
            ..Config::default()
        };
        assert_eq!(config.token().as_deref(), Some("abc"));
    }
}
