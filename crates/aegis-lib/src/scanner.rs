//! Background hazard scanner lifecycle.
//!
//! The hazard-detection collaborator (vision pipeline, sensor feed, test
//! double) is out of scope for this library; it plugs in through the
//! [`HazardSource`] trait. The scanner polls the source at a fixed cadence
//! and publishes every observation to the shared [`WorldStateStore`]
//! through `replace`. Unlike a fire-and-forget daemon thread, the task has
//! an explicit stop: dropping the handle is not enough, callers shut it
//! down deliberately.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::topology::NodeId;
use crate::world::{CrowdReport, WorldStateStore};

/// One complete hazard picture produced by the detection collaborator.
#[derive(Debug, Clone, Default)]
pub struct HazardObservation {
    pub danger_nodes: Vec<NodeId>,
    pub crowd_reports: Vec<CrowdReport>,
}

/// Supplier of hazard observations, implemented by the out-of-scope
/// detection collaborator.
pub trait HazardSource: Send + 'static {
    /// Produce the next observation, or `None` when this cycle has
    /// nothing new to publish.
    fn observe(&mut self) -> Option<HazardObservation>;
}

impl<F> HazardSource for F
where
    F: FnMut() -> Option<HazardObservation> + Send + 'static,
{
    fn observe(&mut self) -> Option<HazardObservation> {
        self()
    }
}

/// Handle to the running background scanner task.
pub struct HazardScanner {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl HazardScanner {
    /// Spawn the scanner loop on the current tokio runtime.
    ///
    /// Every `interval`, the source is polled once and any observation is
    /// swapped into the store. The routing core only depends on `replace`
    /// calls arriving at some cadence; the interval is policy.
    pub fn spawn(
        store: WorldStateStore,
        mut source: impl HazardSource,
        interval: Duration,
    ) -> Self {
        let (shutdown, mut shutdown_rx) = watch::channel(false);

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            tracing::info!(interval_ms = interval.as_millis() as u64, "hazard scanner started");

            loop {
                tokio::select! {
                    changed = shutdown_rx.changed() => {
                        if changed.is_err() || *shutdown_rx.borrow() {
                            break;
                        }
                    }
                    _ = ticker.tick() => {
                        let Some(observation) = source.observe() else {
                            tracing::debug!("no hazard update this cycle");
                            continue;
                        };
                        store.replace(observation.danger_nodes, observation.crowd_reports);
                    }
                }
            }

            tracing::info!("hazard scanner stopped");
        });

        Self { shutdown, task }
    }

    /// Stop the scanner and wait for the task to finish.
    pub async fn shutdown(self) {
        // The receiver is gone only if the task already exited, in which
        // case there is nothing left to stop.
        let _ = self.shutdown.send(true);
        let _ = self.task.await;
    }

    /// Whether the scanner task has already exited.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}
