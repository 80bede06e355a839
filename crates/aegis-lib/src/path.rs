use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use crate::overlay::WorkingGraph;
use crate::topology::{NodeId, Topology};

/// Run A* from `start` to `goal` over a working graph.
///
/// The heuristic is the straight-line Euclidean distance taken from the
/// ORIGINAL topology coordinates. Base edge weight equals that distance
/// and hazard penalties only ever increase weights, so the heuristic never
/// overestimates the remaining cost and the returned path is truly
/// shortest, not merely greedy.
///
/// Returns the path (start..=goal) and its total cost, or `None` when the
/// goal is unreachable.
pub fn find_route_a_star(
    working: &WorkingGraph,
    topology: &Topology,
    start: &NodeId,
    goal: &NodeId,
) -> Option<(Vec<NodeId>, f64)> {
    if !working.contains(start) || !working.contains(goal) {
        return None;
    }
    if start == goal {
        return Some((vec![start.clone()], 0.0));
    }

    let mut g_score: HashMap<NodeId, f64> = HashMap::new();
    let mut parents: HashMap<NodeId, Option<NodeId>> = HashMap::new();
    let mut queue = BinaryHeap::new();

    g_score.insert(start.clone(), 0.0);
    parents.insert(start.clone(), None);
    let start_estimate = heuristic_distance(topology, start, goal);
    queue.push(AStarEntry::new(start.clone(), 0.0, start_estimate));

    while let Some(entry) = queue.pop() {
        let current_score = match g_score.get(&entry.node) {
            Some(score) if (*score - entry.cost.0).abs() < f64::EPSILON => *score,
            Some(score) if *score < entry.cost.0 => continue,
            Some(score) => *score,
            None => continue,
        };

        if entry.node == *goal {
            let path = reconstruct_path(&parents, start, goal);
            return Some((path, current_score));
        }

        for edge in working.neighbours(&entry.node) {
            let next = &edge.target;
            let tentative_g = current_score + edge.weight;
            if tentative_g < *g_score.get(next).unwrap_or(&f64::INFINITY) {
                g_score.insert(next.clone(), tentative_g);
                parents.insert(next.clone(), Some(entry.node.clone()));
                let heuristic = heuristic_distance(topology, next, goal);
                queue.push(AStarEntry::new(next.clone(), tentative_g, heuristic));
            }
        }
    }

    None
}

fn heuristic_distance(topology: &Topology, from: &NodeId, to: &NodeId) -> f64 {
    topology.distance_between(from, to).unwrap_or(0.0)
}

fn reconstruct_path(
    parents: &HashMap<NodeId, Option<NodeId>>,
    start: &NodeId,
    goal: &NodeId,
) -> Vec<NodeId> {
    let mut path = Vec::new();
    let mut current = Some(goal.clone());
    while let Some(node) = current {
        path.push(node.clone());
        if node == *start {
            break;
        }
        current = parents.get(&node).cloned().flatten();
    }
    path.reverse();
    path
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq(&other.0)
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
struct AStarEntry {
    node: NodeId,
    cost: FloatOrd,
    estimate: FloatOrd,
}

impl AStarEntry {
    fn new(node: NodeId, cost: f64, heuristic: f64) -> Self {
        Self {
            node,
            cost: FloatOrd(cost),
            estimate: FloatOrd(cost + heuristic),
        }
    }
}

impl Ord for AStarEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by estimate.
        other
            .estimate
            .cmp(&self.estimate)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for AStarEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
