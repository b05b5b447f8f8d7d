use std::fmt;

use async_trait::async_trait;

use super::types::{Query, ResultPage};

/// Errors a catalog lookup can surface. There are no retries, so callers
/// only need the message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Transport failure (timeout, DNS, connection refused).
    Network(String),
    /// The catalog answered with a non-success status or a payload we could not parse.
    Catalog(String),
}

impl CatalogError {
    /// Human-readable message without the category prefix.
    pub fn message(&self) -> &str {
        match self {
            CatalogError::Network(msg) | CatalogError::Catalog(msg) => msg,
        }
    }
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Network(msg) => write!(f, "network error: {msg}"),
            CatalogError::Catalog(msg) => write!(f, "catalog error: {msg}"),
        }
    }
}

impl std::error::Error for CatalogError {}

#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Returns the name of the catalog backend.
    fn name(&self) -> &str;

    /// Fetches one page of movies for the given query. A failure surfaces immediately.
    async fn fetch_movies(&self, query: &Query) -> Result<ResultPage, CatalogError>;
}
