//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::mpsc::{self, UnboundedReceiver};

use crate::ScreenMode;
use crate::catalog::{CatalogClient, CatalogError, Movie, PAGE_SIZE, Query, ResultPage};
use crate::core::action::Action;
use crate::core::state::App;

/// Builds a page whose titles encode the query that produced it.
pub fn stub_page(term: &str, page: u32, include_adult: bool, len: usize) -> ResultPage {
    let movies = (0..len)
        .map(|i| Movie {
            id: (page as u64) * 100 + i as u64,
            title: format!("{term} #{i} p{page} adult={include_adult}"),
            poster_path: None,
            release_date: Some("2001-05-04".to_string()),
            vote_average: 6.5,
        })
        .collect();
    ResultPage { page, movies }
}

/// In-memory catalog that records every query it serves.
#[derive(Default)]
pub struct StubCatalog {
    queries: Mutex<Vec<Query>>,
    next_failure: Mutex<Option<CatalogError>>,
}

impl StubCatalog {
    pub fn queries(&self) -> Vec<Query> {
        self.queries.lock().unwrap().clone()
    }

    /// The next fetch fails with `error` instead of returning a page.
    pub fn fail_next(&self, error: CatalogError) {
        *self.next_failure.lock().unwrap() = Some(error);
    }
}

#[async_trait]
impl CatalogClient for StubCatalog {
    fn name(&self) -> &str {
        "stub"
    }

    async fn fetch_movies(&self, query: &Query) -> Result<ResultPage, CatalogError> {
        self.queries.lock().unwrap().push(query.clone());
        if let Some(error) = self.next_failure.lock().unwrap().take() {
            return Err(error);
        }
        Ok(stub_page(&query.term, query.page, query.include_adult, PAGE_SIZE))
    }
}

/// Creates a test App backed by a StubCatalog, plus the receiving end of its event channel.
pub fn test_app(mode: ScreenMode) -> (App, Arc<StubCatalog>, UnboundedReceiver<Action>) {
    let catalog = Arc::new(StubCatalog::default());
    let (tx, rx) = mpsc::unbounded_channel();
    let app = App::new(catalog.clone(), mode, false, tx);
    (app, catalog, rx)
}
