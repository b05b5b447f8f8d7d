//! # Screen State
//!
//! Everything one movie-listing screen holds. No terminal types here;
//! presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── mode: ScreenMode              // latest listing or search
//! ├── include_adult: bool           // passed through to every query
//! ├── pagination: Pagination        // current page, floored at 1
//! ├── search: SearchController      // raw input, committed term, debounce timer
//! ├── movies: MovieResource         // {data, loading, error} + generations
//! ├── status_message: String        // status bar text
//! └── events: UnboundedSender       // debounce fires come back through here
//! ```
//!
//! State changes only happen through `update(app, action)` in action.rs.
//! Dropping the `App` is the screen's teardown: the debounce timer goes with it.

use std::sync::Arc;

use futures::FutureExt;
use tokio::sync::mpsc::UnboundedSender;

use crate::ScreenMode;
use crate::catalog::{CatalogClient, CatalogError, Query, ResultPage};
use crate::core::action::Action;
use crate::core::fetch::{FetchState, Resource};
use crate::core::pagination::Pagination;
use crate::core::search::{DebounceToken, SearchController};

pub type MovieResource = Resource<Query, ResultPage, CatalogError>;

pub struct App {
    pub mode: ScreenMode,
    pub include_adult: bool,
    pub pagination: Pagination,
    pub search: SearchController,
    pub movies: MovieResource,
    pub status_message: String,
    events: UnboundedSender<Action>,
}

impl App {
    pub fn new(
        catalog: Arc<dyn CatalogClient>,
        mode: ScreenMode,
        include_adult: bool,
        events: UnboundedSender<Action>,
    ) -> Self {
        let movies = Resource::new(move |query: &Query| {
            let catalog = catalog.clone();
            let query = query.clone();
            async move { catalog.fetch_movies(&query).await }.boxed()
        });

        Self {
            mode,
            include_adult,
            pagination: Pagination::new(),
            search: SearchController::new(),
            movies,
            status_message: format!("{} movies", mode.label()),
            events,
        }
    }

    /// The query the screen should be showing, or `None` while a search screen has no term.
    pub fn current_query(&self) -> Option<Query> {
        let page = self.pagination.page();
        match self.mode {
            ScreenMode::Latest => Some(Query::latest(page, self.include_adult)),
            ScreenMode::Search => {
                let term = self.search.committed_term();
                (!term.is_empty()).then(|| Query::new(term, page, self.include_adult))
            }
        }
    }

    pub fn fetch_state(&self) -> &FetchState<ResultPage, CatalogError> {
        self.movies.state()
    }

    pub fn page(&self) -> u32 {
        self.pagination.page()
    }

    pub fn can_go_back(&self) -> bool {
        !self.pagination.is_first()
    }

    /// Only a full page hints at another one.
    pub fn can_go_forward(&self) -> bool {
        self.fetch_state()
            .data
            .as_ref()
            .is_some_and(ResultPage::has_more)
    }

    /// Placeholder text when there is nothing to list and nothing in progress.
    pub fn empty_message(&self) -> Option<&'static str> {
        let state = self.fetch_state();
        if state.loading || state.error.is_some() {
            return None;
        }
        if state.data.as_ref().is_some_and(|page| !page.is_empty()) {
            return None;
        }
        match self.mode {
            ScreenMode::Search if self.search.raw_input().trim().is_empty() => {
                Some("Search for a movie")
            }
            _ => Some("No Movies Found"),
        }
    }

    pub fn results_heading(&self) -> Option<String> {
        let state = self.fetch_state();
        if state.loading || state.error.is_some() {
            return None;
        }
        state.data.as_ref().filter(|page| !page.is_empty())?;
        match self.mode {
            ScreenMode::Latest => Some("Latest Movies".to_string()),
            ScreenMode::Search => Some(format!(
                "Search Results for {}",
                self.search.committed_term()
            )),
        }
    }

    /// Callback handed to the debounce timer; routes the fire back into the event loop.
    pub(crate) fn debounce_notifier(&self) -> Box<dyn FnOnce(DebounceToken) + Send + 'static> {
        let events = self.events.clone();
        Box::new(move |token| {
            if events.send(Action::DebounceElapsed(token)).is_err() {
                log::debug!("Debounce fired after the event loop closed");
            }
        })
    }
}
