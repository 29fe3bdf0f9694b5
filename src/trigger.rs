//! Debounced run triggering
//!
//! Hosts re-submit the dependency list on every edit; issuing a registry
//! run per keystroke would be wasteful and immediately superseded. The
//! trigger coalesces submissions: a run starts only after the input has
//! been quiet for the configured delay, and only the newest snapshot is
//! looked up.

use crate::coordinator::LookupCoordinator;
use crate::domain::Dependency;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::debug;

/// Coalescing front door to [`LookupCoordinator::lookup`]
pub struct DebouncedTrigger {
    tx: mpsc::UnboundedSender<Vec<Dependency>>,
    worker: JoinHandle<()>,
}

impl DebouncedTrigger {
    /// Spawn the debounce worker in front of `coordinator`
    pub fn new(coordinator: Arc<LookupCoordinator>, delay: Duration) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<Vec<Dependency>>();

        let worker = tokio::spawn(async move {
            while let Some(mut pending) = rx.recv().await {
                // Keep absorbing newer snapshots until the input goes quiet
                loop {
                    tokio::select! {
                        () = sleep(delay) => break,
                        next = rx.recv() => match next {
                            Some(snapshot) => pending = snapshot,
                            // Sender gone: flush what we have and stop
                            None => break,
                        },
                    }
                }
                debug!("debounce window closed, starting lookup run");
                coordinator.lookup(&pending);
            }
        });

        Self { tx, worker }
    }

    /// Submit the current dependency list; resets the quiet window
    ///
    /// Also the endpoint for "input changed, recompute": whichever snapshot
    /// survives the window supersedes the run in flight.
    pub fn submit(&self, dependencies: Vec<Dependency>) {
        // Worker outlives every sender except during teardown
        let _ = self.tx.send(dependencies);
    }
}

impl Drop for DebouncedTrigger {
    fn drop(&mut self) {
        self.worker.abort();
    }
}
