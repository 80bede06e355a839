//! Router and handlers for the Aegis evacuation routing microservice.
//!
//! # Endpoints
//!
//! - `POST /api/v1/escape` - Compute the safest route to the nearest exit
//! - `GET /api/v1/world-state` - Read the live hazard picture
//! - `PUT /api/v1/world-state` - Whole-state replacement from the hazard
//!   collaborator
//! - `GET /metrics` - Prometheus metrics endpoint
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe

#![deny(warnings)]

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use aegis_lib::{plan_escape, EscapeRequest as LibEscapeRequest, Error as LibError};
use aegis_service_shared::{
    from_lib_error, health_live, health_ready, metrics_handler, record_escape_failed,
    record_escape_hops, record_escape_planned, record_world_state_replaced, AppState,
    EscapeRequest, ProblemDetails, ServiceResponse, Validate, WorldStateUpdate,
};

const SERVICE: &str = "evac";

/// Escape response returned to the caller.
#[derive(Debug, Serialize)]
pub struct EscapeResponse {
    /// Ordered node ids from the start to the chosen exit.
    pub path: Vec<String>,
    /// Total cost over the penalized working graph.
    pub cost: f64,
    /// The effective danger set applied to this request, sorted.
    pub live_danger_nodes: Vec<String>,
    /// The exit the path ends at.
    pub exit: String,
    /// Number of hops in the route.
    pub hops: usize,
}

/// World-state summary returned to dashboards and collaborators.
#[derive(Debug, Serialize)]
pub struct WorldStateResponse {
    pub danger_nodes: Vec<String>,
    pub crowd_data: Vec<aegis_lib::CrowdReport>,
    pub has_fire: bool,
}

/// HTTP response - either success or RFC 9457 error.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Response<T> {
    Success(ServiceResponse<T>),
    Error(ProblemDetails),
}

impl<T: Serialize> IntoResponse for Response<T> {
    fn into_response(self) -> axum::response::Response {
        match self {
            Response::Success(data) => (StatusCode::OK, Json(data)).into_response(),
            Response::Error(problem) => problem.into_response(),
        }
    }
}

/// Build the service router over the given application state.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/escape", post(escape_handler))
        .route("/api/v1/world-state", get(get_world_state_handler))
        .route("/api/v1/world-state", put(put_world_state_handler))
        .route("/metrics", get(metrics_handler))
        .route("/health/live", get(health_live))
        .route("/health/ready", get(health_ready))
        // The original dashboard is a browser app polling this service.
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Handle POST /api/v1/escape requests.
async fn escape_handler(
    State(state): State<AppState>,
    Json(request): Json<EscapeRequest>,
) -> Response<EscapeResponse> {
    let request_id = generate_request_id();

    info!(
        request_id = %request_id,
        start_node = %request.start_node,
        extra_danger_nodes = request.extra_danger_nodes.len(),
        "handling escape request"
    );

    if let Err(problem) = request.validate(&request_id) {
        record_escape_failed("validation_error", SERVICE);
        return Response::Error(*problem);
    }

    // Snapshot once; the rest of the request works on private copies.
    let world = state.world().snapshot();

    let lib_request = LibEscapeRequest {
        start: request.start_node.clone(),
        extra_danger_nodes: request.extra_danger_nodes.clone(),
    };

    let plan = match plan_escape(state.topology(), &world, &lib_request) {
        Ok(plan) => plan,
        Err(e) => {
            error!(request_id = %request_id, error = %e, "escape planning failed");
            let reason = match e {
                LibError::InvalidStartNode { .. } => "invalid_start_node",
                LibError::NoSafePath => "no_safe_path",
                _ => "internal_error",
            };
            record_escape_failed(reason, SERVICE);
            return Response::Error(from_lib_error(&e, &request_id));
        }
    };

    let hops = plan.hop_count();
    let response = EscapeResponse {
        path: plan.path,
        cost: plan.cost,
        live_danger_nodes: plan.danger_nodes,
        exit: plan.exit,
        hops,
    };

    record_escape_planned(SERVICE);
    record_escape_hops(hops);

    info!(
        request_id = %request_id,
        hops = response.hops,
        cost = response.cost,
        exit = %response.exit,
        "escape route computed successfully"
    );

    Response::Success(ServiceResponse::new(response))
}

/// Handle GET /api/v1/world-state requests.
async fn get_world_state_handler(State(state): State<AppState>) -> Json<WorldStateResponse> {
    let world = state.world().snapshot();
    Json(WorldStateResponse {
        danger_nodes: world.sorted_danger_nodes(),
        has_fire: world.has_fire(),
        crowd_data: world.crowd_reports,
    })
}

/// Handle PUT /api/v1/world-state requests from the hazard collaborator.
async fn put_world_state_handler(
    State(state): State<AppState>,
    Json(update): Json<WorldStateUpdate>,
) -> Response<WorldStateResponse> {
    let request_id = generate_request_id();

    if let Err(problem) = update.validate(&request_id) {
        return Response::Error(*problem);
    }

    record_world_state_replaced(update.danger_nodes.len(), update.crowd_data.len());
    state
        .world()
        .replace(update.danger_nodes, update.crowd_data);

    let world = state.world().snapshot();
    Response::Success(ServiceResponse::new(WorldStateResponse {
        danger_nodes: world.sorted_danger_nodes(),
        has_fire: world.has_fire(),
        crowd_data: world.crowd_reports,
    }))
}

/// Generate a unique request ID for tracing.
fn generate_request_id() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};

    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();

    format!("req-{:x}", timestamp)
}
