use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the Aegis library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Topology document could not be located at the resolved path.
    #[error("topology not found at {}", path.display())]
    TopologyNotFound { path: PathBuf },

    /// Topology document could not be parsed as a node-list.
    #[error("failed to parse topology document: {0}")]
    TopologyParse(#[from] serde_json::Error),

    /// Raised when the requested start node is absent from the working
    /// graph, either because it never existed or because hazard pruning
    /// removed it.
    #[error("start node '{node}' is blocked or unknown")]
    InvalidStartNode { node: String },

    /// Raised when no exit is reachable from the start node.
    #[error("no safe path to any exit")]
    NoSafePath,

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
