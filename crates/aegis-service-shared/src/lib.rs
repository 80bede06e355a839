//! Shared infrastructure for the Aegis evacuation HTTP service.
//!
//! This crate provides the HTTP glue used by the service binary:
//!
//! - [`AppState`]: Pre-loaded topology plus the live world-state store
//! - [`health`]: Health check handlers for liveness/readiness probes
//! - [`ProblemDetails`]: RFC 9457 Problem Details for consistent errors
//! - [`ServiceResponse`]: Wrapper for successful responses
//! - [`metrics`]: Prometheus metrics infrastructure
//! - [`logging`]: Structured JSON logging setup
//! - Request types with validation for each endpoint
//!
//! The service follows a thin-handler pattern: all routing logic lives in
//! `aegis-lib`, and handlers only parse, validate, call the library, and
//! format the result.

#![deny(warnings)]

mod health;
pub mod logging;
pub mod metrics;
mod problem;
mod request;
mod response;
mod state;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use health::{health_live, health_ready, HealthStatus};
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use metrics::{
    init_metrics, metrics_handler, record_escape_failed, record_escape_hops,
    record_escape_planned, record_world_state_replaced, MetricsConfig, MetricsError,
};
pub use problem::{
    from_lib_error, ProblemDetails, PROBLEM_INTERNAL_ERROR, PROBLEM_INVALID_REQUEST,
    PROBLEM_INVALID_START_NODE, PROBLEM_NO_SAFE_PATH, PROBLEM_SERVICE_UNAVAILABLE,
};
pub use request::{EscapeRequest, Validate, WorldStateUpdate};
pub use response::ServiceResponse;
pub use state::{AppState, AppStateError};
