//! Concurrent lookup coordination
//!
//! This module provides:
//! - Fan-out of one registry fetch per distinct package name
//! - Bounded in-flight concurrency with backpressure
//! - Incremental, tear-free progress and outcome snapshots
//! - Run supersession: a new lookup cancels the one in flight
//!
//! The coordinator owns the pipeline's only mutable shared state. Each run
//! carries a generation id; outcomes are applied under the state lock only
//! while their generation is still current, so a fetch that survives
//! cancellation on the network can never contaminate a newer run.

use crate::config::PipelineConfig;
use crate::domain::{Dependency, LookupOutcome, LookupProgress};
use crate::error::DriftError;
use crate::registry::{HttpClient, MetadataFetcher, NpmRegistry};
use futures::future::join_all;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use tokio::sync::{watch, Semaphore};
use tokio::task::{AbortHandle, JoinHandle};
use tracing::{debug, info};

/// Immutable view of every outcome recorded so far in the current run
pub type OutcomeSnapshot = Arc<HashMap<String, LookupOutcome>>;

/// State of the current run, guarded by one lock
struct RunState {
    /// Generation counter; bumped when a run is superseded
    run_id: u64,
    progress: LookupProgress,
    outcomes: HashMap<String, LookupOutcome>,
    /// Abort handles for the in-flight run's tasks
    aborts: Vec<AbortHandle>,
}

/// Shared between the coordinator and its fetch tasks
struct Shared {
    state: Mutex<RunState>,
    progress_tx: watch::Sender<LookupProgress>,
    outcomes_tx: watch::Sender<OutcomeSnapshot>,
}

impl Shared {
    /// Record one settled fetch if its run is still current
    fn apply(&self, run_id: u64, package: String, outcome: LookupOutcome) {
        let mut state = self.state.lock().unwrap();
        if state.run_id != run_id {
            debug!("discarding superseded outcome for {}", package);
            return;
        }
        state.outcomes.insert(package, outcome);
        state.progress.fulfilled += 1;
        self.progress_tx.send_replace(state.progress);
        self.outcomes_tx.send_replace(Arc::new(state.outcomes.clone()));
    }
}

/// Coordinates concurrent registry lookups for a dependency list
///
/// At most one run is ever active: calling [`lookup`](Self::lookup) while a
/// previous run is in flight cancels it and starts over with fresh
/// counters. Observers subscribe once and see every run through the same
/// channels.
pub struct LookupCoordinator {
    fetcher: Arc<dyn MetadataFetcher>,
    limiter: Arc<Semaphore>,
    shared: Arc<Shared>,
}

impl LookupCoordinator {
    /// Create a coordinator over an arbitrary fetcher
    pub fn new(fetcher: Arc<dyn MetadataFetcher>, max_in_flight: usize) -> Self {
        let (progress_tx, _) = watch::channel(LookupProgress::default());
        let (outcomes_tx, _) = watch::channel(OutcomeSnapshot::default());
        Self {
            fetcher,
            limiter: Arc::new(Semaphore::new(max_in_flight)),
            shared: Arc::new(Shared {
                state: Mutex::new(RunState {
                    run_id: 0,
                    progress: LookupProgress::default(),
                    outcomes: HashMap::new(),
                    aborts: Vec::new(),
                }),
                progress_tx,
                outcomes_tx,
            }),
        }
    }

    /// Build the whole stack (HTTP client, npm fetcher, coordinator) from
    /// a validated configuration
    pub fn from_config(config: &PipelineConfig) -> Result<Self, DriftError> {
        config.validate()?;
        let client = HttpClient::with_config(config.fetch_timeout(), &config.user_agent)?;
        let fetcher: Arc<dyn MetadataFetcher> =
            Arc::new(NpmRegistry::with_base_url(client, &config.registry_url));
        Ok(Self::new(fetcher, config.max_in_flight))
    }

    /// Start a lookup run over `dependencies`
    ///
    /// Deduplicates by package name, supersedes any run still in flight,
    /// and returns a handle that settles when every fetch of this run has
    /// a recorded outcome. An empty input clears results and progress
    /// without fetching anything.
    pub fn lookup(&self, dependencies: &[Dependency]) -> RunHandle {
        let names = dedupe_names(dependencies);

        let run_id = {
            let mut state = self.shared.state.lock().unwrap();
            for abort in state.aborts.drain(..) {
                abort.abort();
            }
            state.run_id += 1;
            state.progress = LookupProgress::new(names.len());
            state.outcomes = HashMap::new();
            // Total is visible before the first fetch is issued
            self.shared.progress_tx.send_replace(state.progress);
            self.shared.outcomes_tx.send_replace(OutcomeSnapshot::default());
            state.run_id
        };

        info!("lookup run {} over {} distinct packages", run_id, names.len());

        let mut tasks: Vec<JoinHandle<()>> = Vec::with_capacity(names.len());
        for name in names {
            let fetcher = Arc::clone(&self.fetcher);
            let limiter = Arc::clone(&self.limiter);
            let shared = Arc::clone(&self.shared);
            tasks.push(tokio::spawn(async move {
                let Ok(_permit) = limiter.acquire_owned().await else {
                    return;
                };
                let outcome = fetcher.fetch_metadata(&name).await;
                shared.apply(run_id, name, outcome);
            }));
        }

        {
            let mut state = self.shared.state.lock().unwrap();
            if state.run_id == run_id {
                state.aborts = tasks.iter().map(JoinHandle::abort_handle).collect();
            } else {
                // Superseded between spawn and registration
                for task in &tasks {
                    task.abort();
                }
            }
        }

        RunHandle { run_id, tasks }
    }

    /// Subscribe to progress updates; the pair is published atomically
    pub fn subscribe_progress(&self) -> watch::Receiver<LookupProgress> {
        self.shared.progress_tx.subscribe()
    }

    /// Subscribe to outcome snapshots, updated on every settled fetch
    pub fn subscribe_outcomes(&self) -> watch::Receiver<OutcomeSnapshot> {
        self.shared.outcomes_tx.subscribe()
    }

    /// Current progress snapshot
    pub fn progress(&self) -> LookupProgress {
        *self.shared.progress_tx.borrow()
    }

    /// Current outcome snapshot
    pub fn outcomes(&self) -> OutcomeSnapshot {
        self.shared.outcomes_tx.borrow().clone()
    }
}

/// Handle to one lookup run
pub struct RunHandle {
    run_id: u64,
    tasks: Vec<JoinHandle<()>>,
}

impl RunHandle {
    /// Generation id of this run
    pub fn run_id(&self) -> u64 {
        self.run_id
    }

    /// Wait until every fetch of this run has settled
    ///
    /// Resolves immediately for an empty run, and as soon as the tasks are
    /// torn down for a superseded one.
    pub async fn settled(self) {
        join_all(self.tasks).await;
    }
}

/// Distinct package names in first-seen order
fn dedupe_names(dependencies: &[Dependency]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut names = Vec::new();
    for dep in dependencies {
        if seen.insert(dep.name.as_str()) {
            names.push(dep.name.clone());
        }
    }
    names
}
