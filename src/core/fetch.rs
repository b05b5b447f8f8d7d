//! # Async Resource
//!
//! A generic "run this producer, expose `{data, loading, error}`" primitive.
//! It owns exactly one `FetchState` and knows nothing about what the producer
//! does (network, disk, a test stub).
//!
//! ```text
//!   watch(deps) ──changed?──► run() ──► PendingRun { generation, future }
//!                                              │
//!                      (caller awaits the future wherever it likes)
//!                                              ▼
//!                              resolve(Resolution { generation, result })
//!                                              │
//!                          generation == current ? commit : discard
//! ```
//!
//! Every `run()` takes a fresh generation. Only the resolution carrying the
//! current generation may commit, so a superseded request that finishes late
//! is dropped silently. The in-flight future is never aborted, only ignored.

use futures::future::BoxFuture;
use log::debug;

/// Identifies one `run()` of a `Resource`. Strictly increasing per resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

/// Observable state of a resource.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchState<T, E> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<E>,
}

impl<T, E> Default for FetchState<T, E> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
        }
    }
}

/// Builds the future for one run from the current dependency value.
pub type Producer<D, T, E> = Box<dyn Fn(&D) -> BoxFuture<'static, Result<T, E>> + Send + Sync>;

/// A started run that has not resolved yet.
pub struct PendingRun<T, E> {
    generation: Generation,
    future: BoxFuture<'static, Result<T, E>>,
}

impl<T, E> PendingRun<T, E> {
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Drives the producer's future to completion and tags the outcome.
    pub async fn complete(self) -> Resolution<T, E> {
        Resolution {
            generation: self.generation,
            result: self.future.await,
        }
    }
}

impl<T, E> std::fmt::Debug for PendingRun<T, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingRun")
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

/// Outcome of a run, tagged with the generation it was started under.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution<T, E> {
    pub generation: Generation,
    pub result: Result<T, E>,
}

pub struct Resource<D, T, E> {
    producer: Producer<D, T, E>,
    deps: Option<D>,
    state: FetchState<T, E>,
    generation: u64,
}

impl<D: PartialEq, T, E> Resource<D, T, E> {
    pub fn new<F>(producer: F) -> Self
    where
        F: Fn(&D) -> BoxFuture<'static, Result<T, E>> + Send + Sync + 'static,
    {
        Self {
            producer: Box::new(producer),
            deps: None,
            state: FetchState::default(),
            generation: 0,
        }
    }

    pub fn state(&self) -> &FetchState<T, E> {
        &self.state
    }

    /// Dependency value of the most recent run, if any.
    pub fn deps(&self) -> Option<&D> {
        self.deps.as_ref()
    }

    /// Starts a run if `deps` differs (by value) from the last one seen.
    pub fn watch(&mut self, deps: D) -> Option<PendingRun<T, E>> {
        if self.deps.as_ref() == Some(&deps) {
            return None;
        }
        self.deps = Some(deps);
        self.run()
    }

    /// Starts a run with the current dependency value, superseding any run in flight.
    ///
    /// Returns `None` until `watch` has supplied a dependency value.
    pub fn run(&mut self) -> Option<PendingRun<T, E>> {
        let deps = self.deps.as_ref()?;
        self.generation += 1;
        self.state.loading = true;
        self.state.error = None;
        debug!("Resource run started (generation {})", self.generation);

        Some(PendingRun {
            generation: Generation(self.generation),
            future: (self.producer)(deps),
        })
    }

    /// Manual re-run outside the dependency-triggered path.
    pub fn refetch(&mut self) -> Option<PendingRun<T, E>> {
        self.run()
    }

    /// Back to the initial empty state without starting a run.
    ///
    /// Runs still in flight are invalidated, and the dependency value is
    /// forgotten so the next `watch` always starts a run.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.deps = None;
        self.state = FetchState::default();
        debug!("Resource reset (generation {})", self.generation);
    }

    /// Commits a resolution if it belongs to the current run. Returns whether it committed.
    ///
    /// On failure the previous `data` is left in place next to the error.
    pub fn resolve(&mut self, resolution: Resolution<T, E>) -> bool {
        if resolution.generation != Generation(self.generation) || !self.state.loading {
            debug!(
                "Discarding stale resolution (generation {:?}, current {})",
                resolution.generation, self.generation
            );
            return false;
        }

        match resolution.result {
            Ok(data) => {
                self.state.data = Some(data);
                self.state.error = None;
            }
            Err(error) => self.state.error = Some(error),
        }
        self.state.loading = false;
        true
    }
}
