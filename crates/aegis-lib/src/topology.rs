use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Identifier assigned to a topology node by the map-conversion tooling.
/// Identity is external; this library never generates ids.
pub type NodeId = String;

/// A single record in the node-list document produced by the map converter.
///
/// Each record declares its own adjacency by referencing other node ids.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: NodeId,
    pub name: String,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub exit_node: bool,
    #[serde(default)]
    pub adjacent: Vec<NodeId>,
}

/// A junction or room in the facility graph.
#[derive(Debug, Clone)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub is_exit: bool,
}

impl Node {
    /// Straight-line distance to another node.
    pub fn distance_to(&self, other: &Node) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Weighted connection to a neighbouring node.
#[derive(Debug, Clone)]
pub struct Edge {
    pub target: NodeId,
    pub weight: f64,
}

/// Immutable facility graph built once at startup.
///
/// Nodes and edges are looked up by id through maps rather than embedded
/// references, which keeps ownership simple and lets request handlers copy
/// the adjacency cheaply. Base edge weight equals the Euclidean distance
/// between the endpoints, so it can serve as an admissible A* heuristic.
#[derive(Debug, Clone, Default)]
pub struct Topology {
    nodes: HashMap<NodeId, Node>,
    adjacency: Arc<HashMap<NodeId, Vec<Edge>>>,
    exits: Vec<NodeId>,
}

impl Topology {
    /// Load a topology from a node-list JSON document on disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::TopologyNotFound {
                path: path.to_path_buf(),
            });
        }

        let contents = fs::read_to_string(path)?;
        let records: Vec<NodeRecord> = serde_json::from_str(&contents)?;
        Ok(Self::from_records(records))
    }

    /// Build a topology from already-deserialized node records.
    ///
    /// Adjacency entries that reference an unknown node id are dropped with
    /// a diagnostic; a malformed adjacency never aborts construction and
    /// never materializes a phantom node.
    pub fn from_records(records: Vec<NodeRecord>) -> Self {
        let mut nodes: HashMap<NodeId, Node> = HashMap::with_capacity(records.len());
        let mut exits = Vec::new();

        for record in &records {
            nodes.insert(
                record.id.clone(),
                Node {
                    id: record.id.clone(),
                    name: record.name.clone(),
                    x: record.x,
                    y: record.y,
                    is_exit: record.exit_node,
                },
            );
            if record.exit_node {
                exits.push(record.id.clone());
            }
        }

        let mut adjacency: HashMap<NodeId, Vec<Edge>> = HashMap::with_capacity(nodes.len());
        for id in nodes.keys() {
            adjacency.insert(id.clone(), Vec::new());
        }

        // Records declare adjacency in both directions; track inserted pairs
        // so a mutual declaration does not create a duplicate edge.
        let mut seen: HashSet<(NodeId, NodeId)> = HashSet::new();

        for record in &records {
            for target in &record.adjacent {
                let Some(target_node) = nodes.get(target) else {
                    tracing::warn!(
                        node = %record.id,
                        adjacent = %target,
                        "adjacency references unknown node, dropping"
                    );
                    continue;
                };

                let key = ordered_pair(&record.id, target);
                if !seen.insert(key) {
                    continue;
                }

                let source_node = &nodes[&record.id];
                let weight = source_node.distance_to(target_node);

                // Both entries exist: every known node id was seeded above.
                if let Some(edges) = adjacency.get_mut(&record.id) {
                    edges.push(Edge {
                        target: target.clone(),
                        weight,
                    });
                }
                if let Some(edges) = adjacency.get_mut(target) {
                    edges.push(Edge {
                        target: record.id.clone(),
                        weight,
                    });
                }
            }
        }

        tracing::info!(
            nodes = nodes.len(),
            exits = exits.len(),
            "topology graph built"
        );

        Self {
            nodes,
            adjacency: Arc::new(adjacency),
            exits,
        }
    }

    /// Look up a node by id.
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Return the neighbours for a given node id.
    pub fn neighbours(&self, id: &str) -> &[Edge] {
        self.adjacency.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The full base adjacency, shared behind an `Arc`.
    pub fn adjacency(&self) -> &HashMap<NodeId, Vec<Edge>> {
        &self.adjacency
    }

    /// Exit nodes in declaration order. The order is fixed at startup and
    /// used as the deterministic tie-break when several exits cost the same.
    pub fn exits(&self) -> &[NodeId] {
        &self.exits
    }

    /// Whether a node id exists in the base topology.
    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of nodes in the topology.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the topology has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Straight-line distance between two nodes, from original coordinates.
    ///
    /// Always computed from the base topology, never from a working graph,
    /// so crowd penalties cannot leak into the heuristic.
    pub fn distance_between(&self, a: &str, b: &str) -> Option<f64> {
        let a = self.nodes.get(a)?;
        let b = self.nodes.get(b)?;
        Some(a.distance_to(b))
    }
}

fn ordered_pair(a: &str, b: &str) -> (NodeId, NodeId) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}
