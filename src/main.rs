//! Airline dashboard API entry point.

use std::net::SocketAddr;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use airline_dashboard::api::{create_router, AppState};
use airline_dashboard::config::Config;
use airline_dashboard::error::AppError;
use airline_dashboard::metrics;
use airline_dashboard::upstream::UpstreamClient;
use airline_dashboard::utils::shutdown_signal;

/// How often the Prometheus recorder runs upkeep.
const UPKEEP_INTERVAL: Duration = Duration::from_secs(5);

/// Airline dashboard API with best-effort upstream and mock fallback.
#[derive(Parser, Debug)]
#[command(name = "airline-dashboard")]
#[command(about = "Airline dashboard API serving live upstream data or mock fallbacks")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,

    /// HTTP server port (overrides PORT).
    #[arg(short, long)]
    port: Option<u16>,

    /// Never contact the upstream; serve mock data only.
    #[arg(long)]
    mock_only: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default).
    Serve {
        /// HTTP server port (overrides PORT).
        #[arg(short, long)]
        port: Option<u16>,

        /// Never contact the upstream; serve mock data only.
        #[arg(long)]
        mock_only: bool,
    },

    /// Check configuration validity.
    CheckConfig,

    /// Probe the upstream once and report reachability.
    Probe,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Load configuration before logging so RUST_LOG/VERBOSE from .env apply
    let config = Config::load();

    // Initialize logging
    let verbose = args.verbose || config.as_ref().map(|c| c.verbose).unwrap_or(false);
    let filter = if verbose {
        EnvFilter::new("airline_dashboard=debug,tower_http=debug,info")
    } else {
        match &config {
            Ok(c) => EnvFilter::try_new(&c.rust_log).unwrap_or_else(|_| EnvFilter::new("info")),
            Err(_) => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        }
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let config = config.map_err(|e| {
        error!("Failed to load configuration: {}", e);
        AppError::from(e)
    })?;

    // Handle subcommands
    match args.command {
        Some(Command::CheckConfig) => cmd_check_config(config),
        Some(Command::Probe) => cmd_probe(config).await,
        Some(Command::Serve { port, mock_only }) => cmd_serve(config, port, mock_only).await,
        None => cmd_serve(config, args.port, args.mock_only).await,
    }
}

/// Check configuration validity.
fn cmd_check_config(config: Config) -> anyhow::Result<()> {
    println!("======================================================================");
    println!("AIRLINE DASHBOARD - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Validating configuration... ");
    match config.validate() {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration validation failed"));
        }
    }

    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Port: {}", config.port);
    println!("  Static Dir: {}", config.static_dir);
    println!("  Upstream: {}", if config.mcp_enabled { config.mcp_url.as_str() } else { "Disabled" });
    println!("  Upstream Timeout: {}ms", config.mcp_timeout_ms);
    println!("  Probe Timeout: {}ms", config.mcp_probe_timeout_ms);
    println!("  Bearer Token: {}", if config.token().is_some() { "Set" } else { "Not set" });
    println!("  Metrics: {}", if config.metrics_enabled { "Enabled" } else { "Disabled" });
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Probe the upstream once.
async fn cmd_probe(config: Config) -> anyhow::Result<()> {
    config.validate().map_err(AppError::InvalidConfig)?;

    if !config.mcp_enabled {
        println!("Upstream disabled (MCP_ENABLED=false)");
        return Ok(());
    }

    let client = UpstreamClient::new(&config)?;
    println!("Probing {} ...", client.base_url());

    let outcome = client.probe().await;
    println!("  {}", outcome);

    if outcome.is_reachable() {
        Ok(())
    } else {
        Err(anyhow::anyhow!("Upstream unreachable"))
    }
}

/// Run the HTTP server.
async fn cmd_serve(mut config: Config, port: Option<u16>, mock_only: bool) -> anyhow::Result<()> {
    // Override with CLI args if provided
    if let Some(port) = port {
        config.port = port;
    }
    if mock_only {
        config.mcp_enabled = false;
    }

    // Validate configuration
    config.validate().map_err(|e| {
        error!("Invalid configuration: {}", e);
        AppError::InvalidConfig(e)
    })?;

    let mut app_state = AppState::new(&config)?;

    if config.metrics_enabled {
        match metrics::install_prometheus() {
            Ok(handle) => {
                metrics::spawn_upkeep(handle.clone(), UPKEEP_INTERVAL);
                app_state = app_state.with_metrics(handle);
            }
            Err(e) => warn!("Metrics disabled: {}", e),
        }
    }

    // Advisory startup probe; the server starts regardless
    match app_state.upstream() {
        Some(upstream) => {
            info!("Upstream: {}", upstream.base_url());
            let state = app_state.clone();
            tokio::spawn(async move {
                let outcome = state.refresh_connectivity().await;
                if outcome.is_reachable() {
                    info!("Upstream status: connected ({})", outcome);
                } else {
                    warn!("Upstream status: {}, running in mock mode", outcome);
                }
            });
        }
        None => info!("Upstream disabled, running in mock mode"),
    }

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await?;
    info!("Airline dashboard API listening on http://localhost:{}", config.port);
    info!("Serving static files from {}", config.static_dir);

    let router = create_router(app_state, &config.static_dir);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server closed.");
    Ok(())
}
