use std::collections::{HashMap, HashSet};

use crate::topology::{Edge, NodeId, Topology};
use crate::world::WorldState;

/// Ephemeral per-request graph: the base topology with danger nodes pruned
/// and crowd penalties folded into the surviving edge weights.
///
/// Always a subgraph of the topology it was built from, with every weight
/// greater than or equal to the corresponding base weight. Owned solely by
/// the request that built it, so handlers never synchronize on it.
#[derive(Debug, Clone)]
pub struct WorkingGraph {
    adjacency: HashMap<NodeId, Vec<Edge>>,
    effective_danger: HashSet<NodeId>,
}

impl WorkingGraph {
    /// Build a working graph from the base topology, a world-state
    /// snapshot, and caller-supplied extra danger node ids.
    ///
    /// The effective danger set is the union of the snapshot's danger
    /// nodes and the extra ids; the union is idempotent, so a node flagged
    /// by both sources is pruned once. Hazard entries referencing ids
    /// absent from the topology are logged and ignored, since hazard data
    /// is best-effort and may lag the map.
    pub fn build(topology: &Topology, world: &WorldState, extra_danger: &[NodeId]) -> Self {
        let mut effective_danger: HashSet<NodeId> = world.danger_nodes.clone();
        effective_danger.extend(extra_danger.iter().cloned());

        for id in &effective_danger {
            if !topology.contains(id) {
                tracing::debug!(node = %id, "danger node not in topology, ignoring");
            }
        }

        // Prune danger nodes and every edge incident to them.
        let mut adjacency: HashMap<NodeId, Vec<Edge>> =
            HashMap::with_capacity(topology.adjacency().len());
        for (id, edges) in topology.adjacency() {
            if effective_danger.contains(id) {
                continue;
            }
            let kept: Vec<Edge> = edges
                .iter()
                .filter(|edge| !effective_danger.contains(&edge.target))
                .cloned()
                .collect();
            adjacency.insert(id.clone(), kept);
        }

        // Accumulate penalties per surviving node. Multiple reports on the
        // same node add up.
        let mut penalties: HashMap<&NodeId, f64> = HashMap::new();
        for report in &world.crowd_reports {
            if !adjacency.contains_key(&report.node_id) {
                tracing::debug!(
                    node = %report.node_id,
                    people = report.people_count,
                    "crowd report on absent node, ignoring"
                );
                continue;
            }
            *penalties.entry(&report.node_id).or_insert(0.0) += f64::from(report.people_count);
        }

        // A penalized node taxes every edge still incident to it. Each
        // undirected edge is stored as two directed entries, so each entry
        // picks up the penalty of both of its endpoints to keep the copies
        // symmetric.
        if !penalties.is_empty() {
            for (id, edges) in adjacency.iter_mut() {
                let own = penalties.get(id).copied().unwrap_or(0.0);
                for edge in edges.iter_mut() {
                    let other = penalties.get(&edge.target).copied().unwrap_or(0.0);
                    edge.weight += own + other;
                }
            }
        }

        Self {
            adjacency,
            effective_danger,
        }
    }

    /// Return the neighbours for a given node id.
    pub fn neighbours(&self, id: &str) -> &[Edge] {
        self.adjacency.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether a node survived hazard pruning.
    pub fn contains(&self, id: &str) -> bool {
        self.adjacency.contains_key(id)
    }

    /// The effective danger set applied while building this graph,
    /// including ids that were not present in the topology.
    pub fn effective_danger(&self) -> &HashSet<NodeId> {
        &self.effective_danger
    }

    /// Effective danger set in sorted order, for deterministic responses.
    pub fn sorted_danger(&self) -> Vec<NodeId> {
        let mut nodes: Vec<NodeId> = self.effective_danger.iter().cloned().collect();
        nodes.sort();
        nodes
    }

    /// Number of surviving nodes.
    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    /// Whether pruning removed every node.
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{corridor_topology, world_with};
    use crate::world::CrowdReport;

    #[test]
    fn pruning_removes_node_and_incident_edges() {
        let topology = corridor_topology();
        let world = world_with(&["B"], &[]);
        let working = WorkingGraph::build(&topology, &world, &[]);

        assert!(!working.contains("B"));
        assert!(working.contains("A"));
        assert!(working.neighbours("A").is_empty());
        assert!(working.neighbours("C").is_empty());
    }

    #[test]
    fn union_of_world_and_request_danger_is_idempotent() {
        let topology = corridor_topology();
        let world = world_with(&["B"], &[]);

        let once = WorkingGraph::build(&topology, &world, &[]);
        let twice = WorkingGraph::build(&topology, &world, &["B".to_string()]);

        assert_eq!(once.effective_danger(), twice.effective_danger());
        assert_eq!(once.len(), twice.len());
    }

    #[test]
    fn crowd_penalty_applies_to_every_incident_edge() {
        let topology = corridor_topology();
        let world = world_with(
            &[],
            &[CrowdReport {
                node_id: "B".to_string(),
                people_count: 5,
            }],
        );
        let working = WorkingGraph::build(&topology, &world, &[]);

        // A-B base weight 3, B-C base weight 4; both are incident to B.
        let ab = &working.neighbours("A")[0];
        assert!((ab.weight - 8.0).abs() < f64::EPSILON);

        let ba = working
            .neighbours("B")
            .iter()
            .find(|e| e.target == "A")
            .expect("B-A edge");
        assert!((ba.weight - 8.0).abs() < f64::EPSILON);

        let bc = working
            .neighbours("B")
            .iter()
            .find(|e| e.target == "C")
            .expect("B-C edge");
        assert!((bc.weight - 9.0).abs() < f64::EPSILON);
    }

    #[test]
    fn repeated_reports_accumulate_additively() {
        let topology = corridor_topology();
        let world = world_with(
            &[],
            &[
                CrowdReport {
                    node_id: "B".to_string(),
                    people_count: 5,
                },
                CrowdReport {
                    node_id: "B".to_string(),
                    people_count: 2,
                },
            ],
        );
        let working = WorkingGraph::build(&topology, &world, &[]);

        let ab = &working.neighbours("A")[0];
        assert!((ab.weight - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn report_on_pruned_node_is_ignored() {
        let topology = corridor_topology();
        let world = world_with(
            &["B"],
            &[CrowdReport {
                node_id: "B".to_string(),
                people_count: 50,
            }],
        );
        let working = WorkingGraph::build(&topology, &world, &[]);

        // B is gone; no surviving edge should carry its penalty.
        assert!(working.neighbours("A").is_empty());
        assert!(working.neighbours("C").is_empty());
    }

    #[test]
    fn stale_danger_ids_are_ignored_but_reported_back() {
        let topology = corridor_topology();
        let world = world_with(&["GHOST"], &[]);
        let working = WorkingGraph::build(&topology, &world, &[]);

        assert_eq!(working.len(), 3);
        assert!(working.effective_danger().contains("GHOST"));
    }

    #[test]
    fn working_weights_never_drop_below_base() {
        let topology = corridor_topology();
        let world = world_with(
            &[],
            &[CrowdReport {
                node_id: "C".to_string(),
                people_count: 7,
            }],
        );
        let working = WorkingGraph::build(&topology, &world, &[]);

        for (id, node) in [("A", "B"), ("B", "C"), ("B", "A"), ("C", "B")] {
            let edge = working
                .neighbours(id)
                .iter()
                .find(|e| e.target == node)
                .expect("edge present");
            let base = topology.distance_between(id, node).expect("base distance");
            assert!(edge.weight >= base);
        }
    }
}
