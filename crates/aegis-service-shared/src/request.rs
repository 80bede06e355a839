//! Request types and validation for HTTP endpoints.

use serde::{Deserialize, Serialize};

use aegis_lib::CrowdReport;

use crate::ProblemDetails;

/// Hazard lists are best-effort data from collaborators; cap them so a
/// misbehaving feed cannot make a single request arbitrarily expensive.
const MAX_EXTRA_DANGER_NODES: usize = 256;
const MAX_WORLD_STATE_ENTRIES: usize = 4096;

/// Validation trait for request types.
///
/// Implementations should validate all fields and return a
/// `ProblemDetails` error for invalid input.
pub trait Validate {
    /// Validate the request, returning an error if invalid.
    ///
    /// The `request_id` is used to populate the `instance` field of any
    /// returned `ProblemDetails`.
    ///
    /// Returns a boxed `ProblemDetails` to avoid large `Result::Err` variants.
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>>;
}

/// Request for computing an escape route to the nearest exit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EscapeRequest {
    /// Node id the evacuee is currently at.
    pub start_node: String,

    /// Extra danger node ids to union with the live world state for this
    /// request only.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_danger_nodes: Vec<String>,
}

impl Validate for EscapeRequest {
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>> {
        if self.start_node.trim().is_empty() {
            return Err(Box::new(ProblemDetails::bad_request(
                "The 'start_node' field is required and cannot be empty",
                request_id,
            )));
        }

        if self.extra_danger_nodes.len() > MAX_EXTRA_DANGER_NODES {
            return Err(Box::new(ProblemDetails::bad_request(
                format!(
                    "The 'extra_danger_nodes' field cannot exceed {} entries",
                    MAX_EXTRA_DANGER_NODES
                ),
                request_id,
            )));
        }

        if self.extra_danger_nodes.iter().any(|id| id.trim().is_empty()) {
            return Err(Box::new(ProblemDetails::bad_request(
                "Entries in 'extra_danger_nodes' cannot be empty",
                request_id,
            )));
        }

        Ok(())
    }
}

/// Whole-state replacement pushed by the hazard-detection collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldStateUpdate {
    /// Node ids that are currently unsafe.
    #[serde(default)]
    pub danger_nodes: Vec<String>,

    /// Crowd observations keyed by node id.
    #[serde(default)]
    pub crowd_data: Vec<CrowdReport>,
}

impl Validate for WorldStateUpdate {
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>> {
        if self.danger_nodes.len() > MAX_WORLD_STATE_ENTRIES
            || self.crowd_data.len() > MAX_WORLD_STATE_ENTRIES
        {
            return Err(Box::new(ProblemDetails::bad_request(
                format!(
                    "World state lists cannot exceed {} entries",
                    MAX_WORLD_STATE_ENTRIES
                ),
                request_id,
            )));
        }

        if self.danger_nodes.iter().any(|id| id.trim().is_empty()) {
            return Err(Box::new(ProblemDetails::bad_request(
                "Entries in 'danger_nodes' cannot be empty",
                request_id,
            )));
        }

        if self.crowd_data.iter().any(|r| r.node_id.trim().is_empty()) {
            return Err(Box::new(ProblemDetails::bad_request(
                "Crowd entries require a non-empty 'node_id'",
                request_id,
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_request_valid() {
        let req = EscapeRequest {
            start_node: "P1".to_string(),
            extra_danger_nodes: vec!["P4".to_string()],
        };
        assert!(req.validate("test").is_ok());
    }

    #[test]
    fn test_escape_request_empty_start() {
        let req = EscapeRequest {
            start_node: "   ".to_string(),
            extra_danger_nodes: vec![],
        };
        let err = req.validate("test").unwrap_err();
        assert!(err.detail.as_deref().unwrap().contains("'start_node'"));
    }

    #[test]
    fn test_escape_request_empty_extra_entry() {
        let req = EscapeRequest {
            start_node: "P1".to_string(),
            extra_danger_nodes: vec!["".to_string()],
        };
        let err = req.validate("test").unwrap_err();
        assert!(err
            .detail
            .as_deref()
            .unwrap()
            .contains("'extra_danger_nodes'"));
    }

    #[test]
    fn test_escape_request_too_many_extras() {
        let req = EscapeRequest {
            start_node: "P1".to_string(),
            extra_danger_nodes: (0..300).map(|i| format!("P{i}")).collect(),
        };
        assert!(req.validate("test").is_err());
    }

    #[test]
    fn test_escape_request_defaults_extras() {
        let req: EscapeRequest = serde_json::from_str(r#"{"start_node":"P1"}"#).unwrap();
        assert!(req.extra_danger_nodes.is_empty());
    }

    #[test]
    fn test_world_state_update_valid() {
        let update = WorldStateUpdate {
            danger_nodes: vec!["P1".to_string()],
            crowd_data: vec![CrowdReport {
                node_id: "P2".to_string(),
                people_count: 10,
            }],
        };
        assert!(update.validate("test").is_ok());
    }

    #[test]
    fn test_world_state_update_empty_is_valid() {
        // An all-clear report is a legitimate whole-state replacement.
        let update: WorldStateUpdate = serde_json::from_str("{}").unwrap();
        assert!(update.validate("test").is_ok());
    }

    #[test]
    fn test_world_state_update_blank_danger_id() {
        let update = WorldStateUpdate {
            danger_nodes: vec!["".to_string()],
            crowd_data: vec![],
        };
        let err = update.validate("test").unwrap_err();
        assert!(err.detail.as_deref().unwrap().contains("'danger_nodes'"));
    }

    #[test]
    fn test_world_state_update_blank_crowd_id() {
        let update = WorldStateUpdate {
            danger_nodes: vec![],
            crowd_data: vec![CrowdReport {
                node_id: " ".to_string(),
                people_count: 3,
            }],
        };
        assert!(update.validate("test").is_err());
    }
}
