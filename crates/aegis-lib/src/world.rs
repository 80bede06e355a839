use std::collections::HashSet;
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

use crate::topology::NodeId;

/// An observation associating a node with a congestion penalty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrowdReport {
    pub node_id: NodeId,
    pub people_count: u32,
}

/// The live hazard picture: which nodes are unsafe and where crowds are.
///
/// Replaced as a whole by the hazard collaborator; never patched in place.
#[derive(Debug, Clone, Default)]
pub struct WorldState {
    pub danger_nodes: HashSet<NodeId>,
    pub crowd_reports: Vec<CrowdReport>,
}

impl WorldState {
    /// Whether any node is currently flagged as dangerous.
    pub fn has_fire(&self) -> bool {
        !self.danger_nodes.is_empty()
    }

    /// Danger node ids in sorted order, for deterministic responses.
    pub fn sorted_danger_nodes(&self) -> Vec<NodeId> {
        let mut nodes: Vec<NodeId> = self.danger_nodes.iter().cloned().collect();
        nodes.sort();
        nodes
    }
}

/// Concurrency-safe container for the current [`WorldState`].
///
/// Single designated writer (the hazard collaborator), many concurrent
/// readers (request handlers). The lock is held only across the swap or
/// copy, never across graph mutation or search, so readers contend only
/// briefly with the writer and never with each other.
#[derive(Debug, Clone, Default)]
pub struct WorldStateStore {
    inner: Arc<RwLock<WorldState>>,
}

impl WorldStateStore {
    /// Create a store with an empty world state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically swap the entire state. A concurrent reader observes
    /// either the prior complete state or the new one, never a mix.
    pub fn replace(
        &self,
        danger_nodes: impl IntoIterator<Item = NodeId>,
        crowd_reports: Vec<CrowdReport>,
    ) {
        let next = WorldState {
            danger_nodes: danger_nodes.into_iter().collect(),
            crowd_reports,
        };

        tracing::info!(
            danger_nodes = next.danger_nodes.len(),
            crowd_reports = next.crowd_reports.len(),
            "world state replaced"
        );

        let mut guard = self
            .inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = next;
    }

    /// Return an independent copy of the current state. Callers may mutate
    /// the copy freely without affecting the shared state.
    pub fn snapshot(&self) -> WorldState {
        self.inner
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Whether any danger node is currently recorded.
    pub fn has_fire(&self) -> bool {
        !self
            .inner
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .danger_nodes
            .is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        let store = WorldStateStore::new();
        let state = store.snapshot();
        assert!(state.danger_nodes.is_empty());
        assert!(state.crowd_reports.is_empty());
        assert!(!store.has_fire());
    }

    #[test]
    fn replace_swaps_whole_state() {
        let store = WorldStateStore::new();
        store.replace(
            vec!["P1".to_string(), "P2".to_string()],
            vec![CrowdReport {
                node_id: "P4".to_string(),
                people_count: 12,
            }],
        );

        let state = store.snapshot();
        assert_eq!(state.danger_nodes.len(), 2);
        assert_eq!(state.crowd_reports.len(), 1);
        assert!(store.has_fire());

        // A second replace discards the previous state entirely.
        store.replace(vec!["P9".to_string()], Vec::new());
        let state = store.snapshot();
        assert_eq!(state.sorted_danger_nodes(), vec!["P9".to_string()]);
        assert!(state.crowd_reports.is_empty());
    }

    #[test]
    fn snapshot_is_independent_of_store() {
        let store = WorldStateStore::new();
        store.replace(vec!["P1".to_string()], Vec::new());

        let mut snapshot = store.snapshot();
        snapshot.danger_nodes.insert("P2".to_string());

        assert_eq!(store.snapshot().danger_nodes.len(), 1);
    }

    #[test]
    fn concurrent_readers_see_complete_states() {
        use std::thread;

        let store = WorldStateStore::new();
        let writer = store.clone();

        let handle = thread::spawn(move || {
            for i in 0..100 {
                writer.replace(
                    vec![format!("P{i}"), format!("Q{i}")],
                    vec![CrowdReport {
                        node_id: format!("P{i}"),
                        people_count: i,
                    }],
                );
            }
        });

        for _ in 0..100 {
            let state = store.snapshot();
            // Each published state has either zero or exactly two danger
            // nodes; a half-written state would violate that.
            assert!(state.danger_nodes.is_empty() || state.danger_nodes.len() == 2);
        }

        handle.join().expect("writer thread panicked");
    }
}
