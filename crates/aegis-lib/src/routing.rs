//! Escape planning for hazard-aware evacuation routing.
//!
//! This module provides:
//! - [`EscapeRequest`] - A caller's routing request
//! - [`EscapePlan`] - The selected evacuation route
//! - [`plan_escape`] - Main entry point for computing escape routes
//!
//! # Flow
//!
//! A request-scoped [`WorkingGraph`] is built from the immutable topology
//! and a world-state snapshot, then A* runs from the start node to every
//! known exit and the cheapest result wins. Concurrent requests each own
//! their working graph, so planning never synchronizes with other
//! requests.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::overlay::WorkingGraph;
use crate::path::find_route_a_star;
use crate::topology::{NodeId, Topology};
use crate::world::WorldState;

/// A request to route one location to the nearest safe exit.
#[derive(Debug, Clone, Default)]
pub struct EscapeRequest {
    /// Where the evacuee currently is.
    pub start: NodeId,
    /// Extra danger node ids supplied by the caller, unioned with the
    /// live world state for this request only. They are never committed
    /// back to the shared store.
    pub extra_danger_nodes: Vec<NodeId>,
}

impl EscapeRequest {
    /// Convenience constructor for a request without extra hazards.
    pub fn new(start: impl Into<NodeId>) -> Self {
        Self {
            start: start.into(),
            extra_danger_nodes: Vec::new(),
        }
    }

    /// Attach caller-supplied danger nodes to the request.
    pub fn with_extra_danger(mut self, nodes: Vec<NodeId>) -> Self {
        self.extra_danger_nodes = nodes;
        self
    }
}

/// The evacuation route selected for a request.
#[derive(Debug, Clone, Serialize)]
pub struct EscapePlan {
    /// Node ids from the start to the chosen exit, both inclusive.
    pub path: Vec<NodeId>,
    /// Total cost of the path over the penalized working graph.
    pub cost: f64,
    /// The exit the path ends at.
    pub exit: NodeId,
    /// The effective danger set applied while planning, sorted.
    pub danger_nodes: Vec<NodeId>,
}

impl EscapePlan {
    /// Number of hops in the route.
    pub fn hop_count(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

/// Compute the lowest-cost route from the start node to the nearest exit.
///
/// One A* search runs per exit still present after hazard pruning; the
/// minimum total cost wins. Exits are attempted in the topology's fixed
/// declaration order and only a strictly cheaper result replaces the
/// current best, so exact ties resolve to the earlier exit
/// deterministically.
///
/// # Errors
///
/// - [`Error::InvalidStartNode`] when the start node never existed or was
///   pruned as a danger node. No search runs in that case.
/// - [`Error::NoSafePath`] when no exits are declared or none is
///   reachable.
pub fn plan_escape(
    topology: &Topology,
    world: &WorldState,
    request: &EscapeRequest,
) -> Result<EscapePlan> {
    let working = WorkingGraph::build(topology, world, &request.extra_danger_nodes);

    if !working.contains(&request.start) {
        tracing::debug!(
            start = %request.start,
            known = topology.contains(&request.start),
            "start node absent from working graph"
        );
        return Err(Error::InvalidStartNode {
            node: request.start.clone(),
        });
    }

    if topology.exits().is_empty() {
        tracing::warn!("topology declares no exit nodes");
        return Err(Error::NoSafePath);
    }

    let mut best: Option<(Vec<NodeId>, f64, NodeId)> = None;

    for exit in topology.exits() {
        if !working.contains(exit) {
            tracing::debug!(exit = %exit, "exit pruned by hazards, skipping");
            continue;
        }

        let Some((path, cost)) = find_route_a_star(&working, topology, &request.start, exit)
        else {
            tracing::debug!(start = %request.start, exit = %exit, "exit unreachable");
            continue;
        };

        let better = match &best {
            Some((_, best_cost, _)) => cost < *best_cost,
            None => true,
        };
        if better {
            best = Some((path, cost, exit.clone()));
        }
    }

    let (path, cost, exit) = best.ok_or(Error::NoSafePath)?;

    tracing::info!(
        start = %request.start,
        exit = %exit,
        hops = path.len().saturating_sub(1),
        cost,
        "escape route selected"
    );

    Ok(EscapePlan {
        path,
        cost,
        exit,
        danger_nodes: working.sorted_danger(),
    })
}
