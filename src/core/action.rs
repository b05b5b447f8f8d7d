//! # Actions
//!
//! Everything that can happen on a screen becomes an `Action`.
//! User types a letter? That's `Action::SearchInput(text)`.
//! The catalog answers? That's `Action::MoviesLoaded(resolution)`.
//!
//! `update()` applies the action to the `App` and returns an `Effect` the
//! event loop must carry out. Fetches are returned as pending runs, never
//! awaited here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! Any change to (term, page, include_adult) goes through `refresh()`, which
//! hands the new `Query` to the resource. The resource only starts a run when
//! the query actually differs from the previous one.

use log::{debug, info, warn};

use crate::catalog::{CatalogError, ResultPage};
use crate::core::fetch::{PendingRun, Resolution};
use crate::core::search::{DebounceToken, SearchOutcome};
use crate::core::state::App;
use crate::ScreenMode;

#[derive(Debug, PartialEq)]
pub enum Action {
    /// The screen became visible.
    Mount,
    /// Full text of the search field after a keystroke.
    SearchInput(String),
    DebounceElapsed(DebounceToken),
    NextPage,
    PrevPage,
    ToggleAdult,
    Refetch,
    MoviesLoaded(Resolution<ResultPage, CatalogError>),
    Quit,
}

#[derive(Debug)]
pub enum Effect {
    None,
    /// Await this run and send its resolution back as `Action::MoviesLoaded`.
    Fetch(PendingRun<ResultPage, CatalogError>),
    Quit,
}

impl From<Option<PendingRun<ResultPage, CatalogError>>> for Effect {
    fn from(run: Option<PendingRun<ResultPage, CatalogError>>) -> Self {
        run.map_or(Effect::None, Effect::Fetch)
    }
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Mount => refresh(app),
        Action::SearchInput(text) => {
            if app.mode != ScreenMode::Search {
                debug!("Ignoring search input on {:?} screen", app.mode);
                return Effect::None;
            }
            let notify = app.debounce_notifier();
            app.search.input(text, notify);
            Effect::None
        }
        Action::DebounceElapsed(token) => match app.search.elapsed(token) {
            Some(SearchOutcome::Commit(term)) => {
                info!("Searching for {:?}", term);
                app.pagination.reset();
                refresh(app)
            }
            Some(SearchOutcome::Clear) => {
                app.movies.reset();
                app.status_message = String::from("Search for a movie");
                Effect::None
            }
            None => Effect::None,
        },
        Action::NextPage => {
            app.pagination.next_page();
            refresh(app)
        }
        Action::PrevPage => {
            app.pagination.prev_page();
            refresh(app)
        }
        Action::ToggleAdult => {
            app.include_adult = !app.include_adult;
            app.pagination.reset();
            app.status_message = format!(
                "Adult content: {}",
                if app.include_adult { "shown" } else { "hidden" }
            );
            refresh(app)
        }
        Action::Refetch => app.movies.refetch().into(),
        Action::MoviesLoaded(resolution) => {
            let generation = resolution.generation;
            if !app.movies.resolve(resolution) {
                debug!("Dropped superseded result {:?}", generation);
                return Effect::None;
            }
            let state = app.movies.state();
            if let Some(error) = &state.error {
                warn!("Movie fetch failed: {}", error);
                app.status_message = format!("Error: {}", error.message());
            } else if let Some(page) = &state.data {
                app.status_message = format!("Page {} ({} movies)", page.page, page.len());
            }
            Effect::None
        }
        Action::Quit => {
            app.search.dispose();
            Effect::Quit
        }
    }
}

/// Feeds the current query to the resource. Starts a run only if it changed.
fn refresh(app: &mut App) -> Effect {
    match app.current_query() {
        Some(query) => {
            debug!("Refreshing with {:?}", query);
            app.movies.watch(query).into()
        }
        None => Effect::None,
    }
}
