//! Aegis evacuation routing HTTP microservice.
//!
//! Loads the facility topology once at startup, then serves escape
//! routing and world-state endpoints over the live hazard picture.
//!
//! # Configuration
//!
//! - `AEGIS_TOPOLOGY_PATH` - Path to the topology node-list JSON (default:
//!   /data/topology.json)
//! - `RUST_LOG` - Log level (default: info)
//! - `LOG_FORMAT` - Log format: json (default) or text
//! - `SERVICE_PORT` - HTTP port (default: 8080)

#![deny(warnings)]

use std::env;
use std::net::SocketAddr;

use tracing::{error, info};

use aegis_service_evac::build_router;
use aegis_service_shared::{
    init_logging, init_metrics, AppState, LoggingConfig, MetricsConfig,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (reads LOG_FORMAT from environment)
    let logging_config = LoggingConfig::from_env().with_service("evac");
    init_logging(&logging_config);

    // Initialize metrics
    let metrics_config = MetricsConfig::from_env();
    if let Err(e) = init_metrics(&metrics_config) {
        // Log but don't fail - metrics are optional
        tracing::warn!(error = %e, "failed to initialize metrics, continuing without metrics");
    }

    // Load configuration from environment
    let topology_path =
        env::var("AEGIS_TOPOLOGY_PATH").unwrap_or_else(|_| "/data/topology.json".to_string());
    let port: u16 = env::var("SERVICE_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    info!(topology_path = %topology_path, port = port, "starting evac service");

    // Load application state
    let state = AppState::load(&topology_path).map_err(|e| {
        error!(error = %e, path = %topology_path, "failed to load application state");
        e
    })?;

    info!(
        nodes = state.topology().len(),
        exits = state.topology().exits().len(),
        "application state loaded"
    );

    let app = build_router(state);

    // Bind and serve
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(addr = %addr, "listening on");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
