//! # Core Application Logic
//!
//! The fetch/pagination/search coordination every screen depends on.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • App (screen state)   │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No terminal. No HTTP.  │
//!                    └───────────┬─────────────┘
//!                                │
//!                 ┌──────────────┴──────────────┐
//!                 ▼                             ▼
//!          ┌────────────┐                ┌────────────┐
//!          │    TUI     │                │  Catalog   │
//!          │  Adapter   │                │  (TMDB)    │
//!          │ (ratatui)  │                │            │
//!          └────────────┘                └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`fetch`]: `Resource`, the generation-guarded `{data, loading, error}` holder
//! - [`pagination`]: page counter floored at 1
//! - [`search`]: debounced search input with an owned, cancellable timer
//! - [`state`]: the `App` struct, one screen's state in one place
//! - [`action`]: the `Action` enum and `update()`
//! - [`config`]: config file, env and CLI resolution

pub mod action;
pub mod config;
pub mod fetch;
pub mod pagination;
pub mod search;
pub mod state;
