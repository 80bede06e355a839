//! Test utilities for service handler testing.
//!
//! Provides pre-built application states over the library's fixture
//! topologies so handler tests never touch the filesystem.

use aegis_lib::test_helpers::{corridor_topology, floor_plan_topology};
use aegis_lib::WorldStateStore;

use crate::state::AppState;

/// App state over the three-node corridor fixture (C is the only exit).
pub fn corridor_state() -> AppState {
    AppState::from_components(corridor_topology(), WorldStateStore::new())
}

/// App state over the two-exit floor plan fixture.
pub fn floor_plan_state() -> AppState {
    AppState::from_components(floor_plan_topology(), WorldStateStore::new())
}

/// Generate a unique request ID for testing.
pub fn test_request_id() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock before epoch")
        .as_nanos();
    format!("test-{}", timestamp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corridor_state_shape() {
        let state = corridor_state();
        assert_eq!(state.topology().len(), 3);
        assert_eq!(state.topology().exits(), ["C".to_string()]);
    }

    #[test]
    fn test_floor_plan_state_shape() {
        let state = floor_plan_state();
        assert_eq!(state.topology().exits().len(), 2);
    }

    #[test]
    fn test_request_id_unique() {
        assert_ne!(test_request_id(), test_request_id());
    }
}
