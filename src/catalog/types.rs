use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Nominal number of movies the catalog returns per page.
pub const PAGE_SIZE: usize = 20;

const POSTER_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// One request against the catalog. A new `Query` is built whenever any field changes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Query {
    /// Free-text search term. Empty means "list latest/popular".
    pub term: String,
    /// 1-based page number.
    pub page: u32,
    pub include_adult: bool,
}

impl Query {
    pub fn new(term: impl Into<String>, page: u32, include_adult: bool) -> Self {
        Self {
            term: term.into(),
            page: page.max(1),
            include_adult,
        }
    }

    /// Lists latest/popular movies rather than searching.
    pub fn latest(page: u32, include_adult: bool) -> Self {
        Self::new(String::new(), page, include_adult)
    }

    /// True when the term carries something to search for.
    pub fn is_search(&self) -> bool {
        !self.term.trim().is_empty()
    }
}

/// Movie summary as listed by the catalog. Read-only.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Movie {
    pub id: u64,
    pub title: String,
    pub poster_path: Option<String>,
    pub release_date: Option<String>,
    pub vote_average: f64,
}

impl Movie {
    /// Year part of `release_date`, if the date is present and well-formed.
    pub fn release_year(&self) -> Option<i32> {
        self.release_date
            .as_deref()
            .and_then(|date| NaiveDate::parse_from_str(date, "%Y-%m-%d").ok())
            .map(|date| date.year())
    }

    pub fn poster_url(&self) -> Option<String> {
        self.poster_path
            .as_deref()
            .map(|path| format!("{POSTER_BASE_URL}{path}"))
    }
}

/// One page of results in server order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResultPage {
    pub page: u32,
    pub movies: Vec<Movie>,
}

impl ResultPage {
    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// A full page suggests another one follows. There is no total count to check against.
    pub fn has_more(&self) -> bool {
        self.movies.len() == PAGE_SIZE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(release_date: Option<&str>, poster_path: Option<&str>) -> Movie {
        Movie {
            id: 1,
            title: "Heat".to_string(),
            poster_path: poster_path.map(str::to_string),
            release_date: release_date.map(str::to_string),
            vote_average: 7.9,
        }
    }

    #[test]
    fn test_query_new_clamps_page_to_one() {
        let query = Query::new("alien", 0, false);
        assert_eq!(query.page, 1);
    }

    #[test]
    fn test_query_is_search_ignores_whitespace() {
        assert!(!Query::latest(1, false).is_search());
        assert!(!Query::new("   ", 1, false).is_search());
        assert!(Query::new("alien", 1, false).is_search());
    }

    #[test]
    fn test_release_year() {
        assert_eq!(movie(Some("1995-12-15"), None).release_year(), Some(1995));
        assert_eq!(movie(Some("soon"), None).release_year(), None);
        assert_eq!(movie(None, None).release_year(), None);
    }

    #[test]
    fn test_poster_url() {
        let with_poster = movie(None, Some("/abc.jpg"));
        assert_eq!(
            with_poster.poster_url().as_deref(),
            Some("https://image.tmdb.org/t/p/w500/abc.jpg")
        );
        assert_eq!(movie(None, None).poster_url(), None);
    }

    #[test]
    fn test_has_more_only_for_full_pages() {
        let full = ResultPage {
            page: 1,
            movies: vec![movie(None, None); PAGE_SIZE],
        };
        let short = ResultPage {
            page: 2,
            movies: vec![movie(None, None); 7],
        };
        assert!(full.has_more());
        assert!(!short.has_more());
        assert!(!ResultPage::default().has_more());
    }
}
