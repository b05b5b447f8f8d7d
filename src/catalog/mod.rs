pub mod client;
pub mod tmdb;
pub mod types;

pub use client::{CatalogClient, CatalogError};
pub use tmdb::TmdbClient;
pub use types::{Movie, PAGE_SIZE, Query, ResultPage};
