//! Aegis library entry points.
//!
//! This crate exposes the hazard-aware evacuation routing engine: loading
//! a facility topology, holding the live hazard world state, building the
//! per-request working graph, and running the multi-target A* search to
//! the nearest safe exit. Higher-level consumers (the HTTP service)
//! should only depend on the items exported here instead of
//! reimplementing behavior.

#![deny(warnings)]

pub mod error;
pub mod overlay;
pub mod path;
pub mod routing;
pub mod scanner;
pub mod test_helpers;
pub mod topology;
pub mod world;

pub use error::{Error, Result};
pub use overlay::WorkingGraph;
pub use path::find_route_a_star;
pub use routing::{plan_escape, EscapePlan, EscapeRequest};
pub use scanner::{HazardObservation, HazardScanner, HazardSource};
pub use topology::{Node, NodeId, NodeRecord, Topology};
pub use world::{CrowdReport, WorldState, WorldStateStore};
