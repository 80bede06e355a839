//! Fixture topologies shared by unit, integration, and service tests.

use crate::topology::{NodeRecord, Topology};
use crate::world::{CrowdReport, WorldState};

/// Three nodes in a line: A at (0,0), B at (3,0), C at (7,0).
/// C is the only exit, so A-B weighs 3 and B-C weighs 4.
pub fn corridor_records() -> Vec<NodeRecord> {
    vec![
        NodeRecord {
            id: "A".to_string(),
            name: "West Wing".to_string(),
            x: 0.0,
            y: 0.0,
            exit_node: false,
            adjacent: vec!["B".to_string()],
        },
        NodeRecord {
            id: "B".to_string(),
            name: "Central Hall".to_string(),
            x: 3.0,
            y: 0.0,
            exit_node: false,
            adjacent: vec!["A".to_string(), "C".to_string()],
        },
        NodeRecord {
            id: "C".to_string(),
            name: "East Exit".to_string(),
            x: 7.0,
            y: 0.0,
            exit_node: true,
            adjacent: vec!["B".to_string()],
        },
    ]
}

/// The corridor fixture as a built topology.
pub fn corridor_topology() -> Topology {
    Topology::from_records(corridor_records())
}

/// A small floor plan with two exits and a choice of routes:
///
/// ```text
///   P1 --- P2 --- EXIT1
///    |              |
///   P3 --- P4 ---- P5
///                   |
///                 EXIT2
/// ```
///
/// The top corridor (via P2) is the short route from P1 to EXIT1; the
/// bottom ring (P3, P4, P5) is the longer detour.
pub fn floor_plan_records() -> Vec<NodeRecord> {
    vec![
        NodeRecord {
            id: "P1".to_string(),
            name: "North-West Junction".to_string(),
            x: 0.0,
            y: 0.0,
            exit_node: false,
            adjacent: vec!["P2".to_string(), "P3".to_string()],
        },
        NodeRecord {
            id: "P2".to_string(),
            name: "North Corridor".to_string(),
            x: 4.0,
            y: 0.0,
            exit_node: false,
            adjacent: vec!["P1".to_string(), "EXIT1".to_string()],
        },
        NodeRecord {
            id: "EXIT1".to_string(),
            name: "North-East Exit".to_string(),
            x: 8.0,
            y: 0.0,
            exit_node: true,
            adjacent: vec!["P2".to_string(), "P5".to_string()],
        },
        NodeRecord {
            id: "P3".to_string(),
            name: "South-West Junction".to_string(),
            x: 0.0,
            y: 3.0,
            exit_node: false,
            adjacent: vec!["P1".to_string(), "P4".to_string()],
        },
        NodeRecord {
            id: "P4".to_string(),
            name: "South Corridor".to_string(),
            x: 4.0,
            y: 3.0,
            exit_node: false,
            adjacent: vec!["P3".to_string(), "P5".to_string()],
        },
        NodeRecord {
            id: "P5".to_string(),
            name: "South-East Junction".to_string(),
            x: 8.0,
            y: 3.0,
            exit_node: false,
            adjacent: vec!["P4".to_string(), "EXIT1".to_string(), "EXIT2".to_string()],
        },
        NodeRecord {
            id: "EXIT2".to_string(),
            name: "South Exit".to_string(),
            x: 8.0,
            y: 6.0,
            exit_node: true,
            adjacent: vec!["P5".to_string()],
        },
    ]
}

/// The floor plan fixture as a built topology.
pub fn floor_plan_topology() -> Topology {
    Topology::from_records(floor_plan_records())
}

/// Build a world state from danger ids and crowd reports.
pub fn world_with(danger: &[&str], crowd: &[CrowdReport]) -> WorldState {
    WorldState {
        danger_nodes: danger.iter().map(|id| id.to_string()).collect(),
        crowd_reports: crowd.to_vec(),
    }
}
