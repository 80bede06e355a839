//! Health check handlers for Kubernetes probes.
//!
//! Provides `/health/live` and `/health/ready` endpoints that return JSON
//! status responses for liveness and readiness probes.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::AppState;

/// Health status response for liveness and readiness probes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Status indicator: "ok" or "not_ready: <reason>".
    pub status: String,

    /// Service name for identification.
    pub service: String,

    /// Service version from build-time.
    pub version: String,

    /// Number of topology nodes loaded (for readiness check).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nodes_loaded: Option<usize>,

    /// Number of exit nodes declared (for readiness check).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exits_declared: Option<usize>,
}

impl HealthStatus {
    /// Create a healthy liveness status.
    pub fn alive(service: &str, version: &str) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.to_string(),
            version: version.to_string(),
            nodes_loaded: None,
            exits_declared: None,
        }
    }

    /// Create a ready status with topology information.
    pub fn ready(service: &str, version: &str, nodes: usize, exits: usize) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.to_string(),
            version: version.to_string(),
            nodes_loaded: Some(nodes),
            exits_declared: Some(exits),
        }
    }

    /// Create a not-ready status.
    pub fn not_ready(service: &str, version: &str, reason: &str) -> Self {
        Self {
            status: format!("not_ready: {}", reason),
            service: service.to_string(),
            version: version.to_string(),
            nodes_loaded: None,
            exits_declared: None,
        }
    }
}

/// Liveness probe handler.
///
/// Returns 200 OK if the service is running; does not depend on loaded
/// state.
pub async fn health_live() -> impl IntoResponse {
    let status = HealthStatus::alive(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    (StatusCode::OK, Json(status))
}

/// Readiness probe handler.
///
/// Ready only when a topology is loaded and declares at least one exit;
/// without an exit every escape request would fail with no-safe-path.
pub async fn health_ready(State(state): State<AppState>) -> Response {
    let service = env!("CARGO_PKG_NAME");
    let version = env!("CARGO_PKG_VERSION");

    let topology = state.topology();

    if topology.is_empty() {
        let status = HealthStatus::not_ready(service, version, "no topology nodes loaded");
        return (StatusCode::SERVICE_UNAVAILABLE, Json(status)).into_response();
    }

    if topology.exits().is_empty() {
        let status = HealthStatus::not_ready(service, version, "topology declares no exits");
        return (StatusCode::SERVICE_UNAVAILABLE, Json(status)).into_response();
    }

    let status = HealthStatus::ready(service, version, topology.len(), topology.exits().len());
    (StatusCode::OK, Json(status)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use aegis_lib::test_helpers::corridor_records;
    use aegis_lib::{Topology, WorldStateStore};

    #[test]
    fn test_health_status_alive() {
        let status = HealthStatus::alive("evac", "0.1.0");
        assert_eq!(status.status, "ok");
        assert!(status.nodes_loaded.is_none());
    }

    #[test]
    fn test_health_status_not_ready_reason() {
        let status = HealthStatus::not_ready("evac", "0.1.0", "no topology nodes loaded");
        assert!(status.status.contains("not_ready"));
        assert!(status.status.contains("no topology nodes loaded"));
    }

    #[tokio::test]
    async fn test_ready_requires_an_exit() {
        let mut records = corridor_records();
        for record in &mut records {
            record.exit_node = false;
        }
        let state =
            AppState::from_components(Topology::from_records(records), WorldStateStore::new());

        let response = health_ready(State(state)).await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_ready_with_exit() {
        let state = AppState::from_components(
            Topology::from_records(corridor_records()),
            WorldStateStore::new(),
        );

        let response = health_ready(State(state)).await;
        assert_eq!(response.status(), StatusCode::OK);
    }
}
