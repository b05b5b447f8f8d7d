//! TMDB catalog backend.
//!
//! Two endpoints cover the single query kind the app needs:
//! - `/discover/movie` when the term is empty (latest/popular listing)
//! - `/search/movie` when there is something to search for
//!
//! Credentials travel as a bearer token. No retries: whatever the first
//! attempt yields is what the caller sees.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::Deserialize;

use crate::catalog::{CatalogClient, CatalogError, Movie, Query, ResultPage};

pub const DEFAULT_TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";

// ============================================================================
// TMDB Wire Types
// ============================================================================

#[derive(Deserialize, Debug)]
struct MovieListResponse {
    #[serde(default)]
    page: Option<u32>,
    results: Vec<MovieListItem>,
}

#[derive(Deserialize, Debug)]
struct MovieListItem {
    id: u64,
    title: String,
    poster_path: Option<String>,
    release_date: Option<String>,
    #[serde(default)]
    vote_average: f64,
}

impl From<MovieListItem> for Movie {
    fn from(item: MovieListItem) -> Self {
        Movie {
            id: item.id,
            title: item.title,
            poster_path: item.poster_path.filter(|p| !p.is_empty()),
            // TMDB sends "" for unknown release dates
            release_date: item.release_date.filter(|d| !d.is_empty()),
            vote_average: item.vote_average,
        }
    }
}

// ============================================================================
// Request Building
// ============================================================================

/// Path and query parameters for a catalog query. The term is omitted when blank.
fn request_parts(query: &Query) -> (&'static str, Vec<(&'static str, String)>) {
    let mut params = Vec::with_capacity(4);
    let path = if query.is_search() {
        params.push(("query", query.term.trim().to_string()));
        "/search/movie"
    } else {
        params.push(("sort_by", "popularity.desc".to_string()));
        "/discover/movie"
    };
    params.push(("page", query.page.to_string()));
    params.push(("include_adult", query.include_adult.to_string()));
    (path, params)
}

// ============================================================================
// Client Implementation
// ============================================================================

pub struct TmdbClient {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl TmdbClient {
    pub fn new(api_key: String, base_url: Option<String>) -> Self {
        let base_url = base_url
            .unwrap_or_else(|| DEFAULT_TMDB_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Self {
            api_key,
            base_url,
            client: reqwest::Client::new(),
        }
    }

    /// Applies a transport-level timeout. Expiry surfaces as `CatalogError::Network`.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, CatalogError> {
        self.client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CatalogError::Network(e.to_string()))?;
        Ok(self)
    }
}

#[async_trait]
impl CatalogClient for TmdbClient {
    fn name(&self) -> &str {
        "tmdb"
    }

    async fn fetch_movies(&self, query: &Query) -> Result<ResultPage, CatalogError> {
        let (path, params) = request_parts(query);

        info!(
            "TMDB request: path={}, page={}, include_adult={}, search={}",
            path,
            query.page,
            query.include_adult,
            query.is_search()
        );

        let response = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .bearer_auth(&self.api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .query(&params)
            .send()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        let status = response.status();
        debug!("TMDB response status: {}", status);

        let body = response
            .text()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        if !status.is_success() {
            warn!("TMDB API error: {} - {}", status.as_u16(), body);
            return Err(CatalogError::Catalog(format!(
                "HTTP {}: {}",
                status.as_u16(),
                body
            )));
        }

        let parsed: MovieListResponse = serde_json::from_str(&body).map_err(|e| {
            warn!("TMDB payload could not be parsed: {}", e);
            CatalogError::Catalog(format!("malformed payload: {e}"))
        })?;

        let page = ResultPage {
            page: parsed.page.unwrap_or(query.page),
            movies: parsed.results.into_iter().map(Movie::from).collect(),
        };
        debug!("TMDB returned {} movies for page {}", page.len(), page.page);
        Ok(page)
    }
}
