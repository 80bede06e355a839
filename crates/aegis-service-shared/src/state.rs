//! Application state for the evacuation HTTP service.
//!
//! This module provides the shared state structure that axum handlers use
//! to access the loaded topology and the live world-state store.

use std::path::Path;
use std::sync::Arc;

use aegis_lib::{Error as LibError, Topology, WorldStateStore};

/// Error during application state initialization.
#[derive(Debug)]
pub enum AppStateError {
    /// Failed to load or parse the topology document.
    TopologyLoad(LibError),

    /// Topology document not found.
    TopologyNotFound(String),
}

impl std::fmt::Display for AppStateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TopologyLoad(e) => write!(f, "failed to load topology: {}", e),
            Self::TopologyNotFound(path) => write!(f, "topology not found: {}", path),
        }
    }
}

impl std::error::Error for AppStateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TopologyLoad(e) => Some(e),
            Self::TopologyNotFound(_) => None,
        }
    }
}

impl From<LibError> for AppStateError {
    fn from(err: LibError) -> Self {
        Self::TopologyLoad(err)
    }
}

/// Shared application state for all axum handlers.
///
/// Cheaply cloneable: the immutable topology sits behind an `Arc` and the
/// world-state store is itself a shared handle. Request handlers read
/// both; only the hazard collaborator writes the store.
#[derive(Clone)]
pub struct AppState {
    topology: Arc<Topology>,
    world: WorldStateStore,
}

impl AppState {
    /// Load application state from a topology node-list document.
    ///
    /// The world-state store starts empty and is populated by the hazard
    /// collaborator at runtime.
    pub fn load(topology_path: impl AsRef<Path>) -> Result<Self, AppStateError> {
        let topology_path = topology_path.as_ref();

        if !topology_path.exists() {
            return Err(AppStateError::TopologyNotFound(
                topology_path.display().to_string(),
            ));
        }

        tracing::info!(path = %topology_path.display(), "loading topology");
        let topology = Topology::load(topology_path)?;
        tracing::info!(
            nodes = topology.len(),
            exits = topology.exits().len(),
            "topology loaded successfully"
        );

        Ok(Self {
            topology: Arc::new(topology),
            world: WorldStateStore::new(),
        })
    }

    /// Create application state from pre-built components.
    ///
    /// This is useful for testing or for embedding the service.
    pub fn from_components(topology: Topology, world: WorldStateStore) -> Self {
        Self {
            topology: Arc::new(topology),
            world,
        }
    }

    /// Access the loaded topology.
    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    /// Access the live world-state store.
    pub fn world(&self) -> &WorldStateStore {
        &self.world
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("node_count", &self.topology.len())
            .field("exit_count", &self.topology.exits().len())
            .field("has_fire", &self.world.has_fire())
            .finish()
    }
}
