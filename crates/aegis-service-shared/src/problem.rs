//! RFC 9457 Problem Details for HTTP APIs.
//!
//! Provides structured error responses following the Problem Details
//! standard. See: <https://www.rfc-editor.org/rfc/rfc9457.html>

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use aegis_lib::Error as LibError;

/// Problem type URI for start nodes that are unknown or hazard-pruned.
pub const PROBLEM_INVALID_START_NODE: &str = "/problems/invalid-start-node";

/// Problem type URI for requests where no exit is reachable.
pub const PROBLEM_NO_SAFE_PATH: &str = "/problems/no-safe-path";

/// Problem type URI for invalid request parameters.
pub const PROBLEM_INVALID_REQUEST: &str = "/problems/invalid-request";

/// Problem type URI for internal server errors.
pub const PROBLEM_INTERNAL_ERROR: &str = "/problems/internal-error";

/// Problem type URI for service unavailable (e.g., topology missing).
pub const PROBLEM_SERVICE_UNAVAILABLE: &str = "/problems/service-unavailable";

/// RFC 9457 Problem Details response structure.
///
/// Provides a consistent format for error responses across all endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemDetails {
    /// URI reference identifying the problem type (relative).
    #[serde(rename = "type")]
    pub type_uri: String,

    /// Short, human-readable summary of the problem.
    pub title: String,

    /// HTTP status code for this problem.
    pub status: u16,

    /// Human-readable explanation specific to this occurrence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// URI reference identifying the specific occurrence (request ID).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,

    /// Content type for this response (always "application/problem+json").
    pub content_type: String,
}

impl ProblemDetails {
    /// Create a new ProblemDetails with required fields.
    pub fn new(type_uri: impl Into<String>, title: impl Into<String>, status: StatusCode) -> Self {
        Self {
            type_uri: type_uri.into(),
            title: title.into(),
            status: status.as_u16(),
            detail: None,
            instance: None,
            content_type: "application/problem+json".to_string(),
        }
    }

    /// Add a detailed explanation of this specific problem occurrence.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Add the request identifier for tracing.
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.instance = Some(request_id.into());
        self
    }

    /// Create a 400 Bad Request problem for invalid input.
    pub fn bad_request(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_INVALID_REQUEST,
            "Invalid Request",
            StatusCode::BAD_REQUEST,
        )
        .with_detail(detail)
        .with_request_id(request_id)
    }

    /// Create a 404 Not Found problem for a blocked or unknown start node.
    ///
    /// Distinct from [`ProblemDetails::no_safe_path`] so callers can tell
    /// "your location is unsafe or unknown" apart from "there is no way
    /// out".
    pub fn invalid_start_node(node: &str, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_INVALID_START_NODE,
            "Invalid Start Node",
            StatusCode::NOT_FOUND,
        )
        .with_detail(format!("Start node '{}' is blocked or invalid", node))
        .with_request_id(request_id)
    }

    /// Create a 404 Not Found problem when no exit is reachable.
    pub fn no_safe_path(request_id: impl Into<String>) -> Self {
        Self::new(PROBLEM_NO_SAFE_PATH, "No Safe Path", StatusCode::NOT_FOUND)
            .with_detail("No safe path found to any exit")
            .with_request_id(request_id)
    }

    /// Create a 500 Internal Server Error problem.
    pub fn internal_error(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_INTERNAL_ERROR,
            "Internal Error",
            StatusCode::INTERNAL_SERVER_ERROR,
        )
        .with_detail(detail)
        .with_request_id(request_id)
    }

    /// Create a 503 Service Unavailable problem.
    pub fn service_unavailable(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_SERVICE_UNAVAILABLE,
            "Service Unavailable",
            StatusCode::SERVICE_UNAVAILABLE,
        )
        .with_detail(detail)
        .with_request_id(request_id)
    }
}

impl std::fmt::Display for ProblemDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.title, self.detail.as_deref().unwrap_or(""))
    }
}

impl std::error::Error for ProblemDetails {}

/// Implement IntoResponse for axum to return ProblemDetails as HTTP responses.
impl IntoResponse for ProblemDetails {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let mut response = Json(&self).into_response();
        response.headers_mut().insert(
            axum::http::header::CONTENT_TYPE,
            axum::http::HeaderValue::from_static("application/problem+json"),
        );

        *response.status_mut() = status;
        response
    }
}

/// Convert library errors to ProblemDetails.
///
/// The `request_id` must be provided separately since library errors
/// don't carry one.
pub fn from_lib_error(error: &LibError, request_id: &str) -> ProblemDetails {
    match error {
        LibError::InvalidStartNode { node } => {
            ProblemDetails::invalid_start_node(node, request_id)
        }
        LibError::NoSafePath => ProblemDetails::no_safe_path(request_id),
        LibError::TopologyNotFound { path } => ProblemDetails::service_unavailable(
            format!("Topology not available at {}", path.display()),
            request_id,
        ),
        _ => ProblemDetails::internal_error(error.to_string(), request_id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_problem_details_new() {
        let problem = ProblemDetails::new(
            PROBLEM_NO_SAFE_PATH,
            "No Safe Path",
            StatusCode::NOT_FOUND,
        );
        assert_eq!(problem.type_uri, PROBLEM_NO_SAFE_PATH);
        assert_eq!(problem.title, "No Safe Path");
        assert_eq!(problem.status, 404);
        assert_eq!(problem.content_type, "application/problem+json");
    }

    #[test]
    fn test_problem_details_invalid_start_node() {
        let problem = ProblemDetails::invalid_start_node("P99", "req-123");
        assert_eq!(problem.status, 404);
        assert_eq!(problem.type_uri, PROBLEM_INVALID_START_NODE);
        assert!(problem.detail.as_deref().unwrap().contains("P99"));
        assert_eq!(problem.instance.as_deref(), Some("req-123"));
    }

    #[test]
    fn test_problem_details_bad_request() {
        let problem = ProblemDetails::bad_request("Missing start_node", "req-456");
        assert_eq!(problem.status, 400);
        assert_eq!(problem.instance.as_deref(), Some("req-456"));
    }

    #[test]
    fn test_problem_details_serialization() {
        let problem = ProblemDetails::bad_request("Test error", "req-test");
        let json = serde_json::to_string(&problem).unwrap();

        assert!(json.contains("\"type\":\"/problems/invalid-request\""));
        assert!(json.contains("\"status\":400"));
        assert!(json.contains("\"detail\":\"Test error\""));
        assert!(json.contains("\"instance\":\"req-test\""));
    }

    #[test]
    fn test_from_lib_error_invalid_start_node() {
        let error = LibError::InvalidStartNode {
            node: "P7".to_string(),
        };
        let problem = from_lib_error(&error, "req-lib");

        assert_eq!(problem.type_uri, PROBLEM_INVALID_START_NODE);
        assert_eq!(problem.status, 404);
        assert!(problem.detail.as_deref().unwrap().contains("P7"));
    }

    #[test]
    fn test_from_lib_error_no_safe_path() {
        let problem = from_lib_error(&LibError::NoSafePath, "req-path");

        assert_eq!(problem.type_uri, PROBLEM_NO_SAFE_PATH);
        assert_eq!(problem.status, 404);
    }

    #[test]
    fn test_from_lib_error_io_is_internal() {
        let error = LibError::Io(std::io::Error::other("disk on fire"));
        let problem = from_lib_error(&error, "req-io");

        assert_eq!(problem.type_uri, PROBLEM_INTERNAL_ERROR);
        assert_eq!(problem.status, 500);
    }
}
