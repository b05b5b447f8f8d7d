//! # Debounced Search
//!
//! Keystrokes update `raw_input` immediately. The term that drives queries
//! (`committed_term`) only changes once the input has been quiet for
//! [`DEBOUNCE_QUIET_PERIOD`]. Trailing edge only: no leading fire, no max wait.
//!
//! ```text
//! Idle ──keystroke──► Pending ──keystroke──► Pending (timer restarted)
//!                        │
//!                        ├── quiet & non-blank ──► Committed(term)
//!                        └── quiet & blank ──────► Idle (resource reset)
//! ```
//!
//! The timer is a tokio task owned by the controller. Re-arming aborts the
//! previous task and dropping the controller aborts the current one, so no
//! timer outlives its screen. Each arm also gets a token, and only the token
//! currently armed is honored: a fire that was already queued when the user
//! typed again is ignored.

use std::time::Duration;

use log::debug;
use tokio::task::JoinHandle;

pub const DEBOUNCE_QUIET_PERIOD: Duration = Duration::from_millis(500);

/// Identifies one arming of a `DebounceTimer`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceToken(u64);

/// Single-shot restartable timer. Must be armed from inside a tokio runtime.
pub struct DebounceTimer {
    quiet: Duration,
    handle: Option<JoinHandle<()>>,
    armed: Option<DebounceToken>,
    issued: u64,
}

impl DebounceTimer {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            handle: None,
            armed: None,
            issued: 0,
        }
    }

    /// (Re)starts the quiet period. `on_fire` runs once it elapses, unless re-armed or cancelled first.
    pub fn arm<F>(&mut self, on_fire: F) -> DebounceToken
    where
        F: FnOnce(DebounceToken) + Send + 'static,
    {
        self.cancel();
        self.issued += 1;
        let token = DebounceToken(self.issued);
        let quiet = self.quiet;

        self.handle = Some(tokio::spawn(async move {
            tokio::time::sleep(quiet).await;
            on_fire(token);
        }));
        self.armed = Some(token);
        token
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
        self.armed = None;
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    /// Accepts a fire notification. True only for the token currently armed.
    pub fn acknowledge(&mut self, token: DebounceToken) -> bool {
        if self.armed != Some(token) {
            return false;
        }
        self.armed = None;
        self.handle = None;
        true
    }
}

impl Drop for DebounceTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// What a settled search input means for the listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Search for this (trimmed) term from page 1.
    Commit(String),
    /// Input is blank: clear results instead of querying.
    Clear,
}

pub struct SearchController {
    raw_input: String,
    committed_term: String,
    timer: DebounceTimer,
}

impl Default for SearchController {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchController {
    pub fn new() -> Self {
        Self::with_quiet_period(DEBOUNCE_QUIET_PERIOD)
    }

    pub fn with_quiet_period(quiet: Duration) -> Self {
        Self {
            raw_input: String::new(),
            committed_term: String::new(),
            timer: DebounceTimer::new(quiet),
        }
    }

    pub fn raw_input(&self) -> &str {
        &self.raw_input
    }

    pub fn committed_term(&self) -> &str {
        &self.committed_term
    }

    /// True while a keystroke is waiting for its quiet period.
    pub fn is_pending(&self) -> bool {
        self.timer.is_armed()
    }

    /// Records the new input and restarts the quiet period.
    pub fn input<F>(&mut self, text: String, on_fire: F) -> DebounceToken
    where
        F: FnOnce(DebounceToken) + Send + 'static,
    {
        self.raw_input = text;
        self.timer.arm(on_fire)
    }

    /// Settles the input once its quiet period has elapsed.
    ///
    /// Returns `None` for a token that has since been superseded.
    pub fn elapsed(&mut self, token: DebounceToken) -> Option<SearchOutcome> {
        if !self.timer.acknowledge(token) {
            debug!("Ignoring superseded debounce fire {:?}", token);
            return None;
        }

        let trimmed = self.raw_input.trim();
        if trimmed.is_empty() {
            self.committed_term.clear();
            debug!("Search input blank, clearing results");
            Some(SearchOutcome::Clear)
        } else {
            self.committed_term = trimmed.to_string();
            debug!("Search term committed: {:?}", self.committed_term);
            Some(SearchOutcome::Commit(self.committed_term.clone()))
        }
    }

    /// Cancels any pending quiet period. Also happens on drop.
    pub fn dispose(&mut self) {
        self.timer.cancel();
    }
}
