//! Cinescope library exports for testing

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub mod catalog;
pub mod core;
pub mod tui;

#[cfg(test)]
pub mod test_support;

/// Which listing a screen shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScreenMode {
    /// Latest/popular movies, paged.
    #[default]
    Latest,
    /// Debounced free-text search, paged.
    Search,
}

impl ScreenMode {
    /// The other screen, for Tab switching.
    pub fn toggle(self) -> ScreenMode {
        match self {
            ScreenMode::Latest => ScreenMode::Search,
            ScreenMode::Search => ScreenMode::Latest,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ScreenMode::Latest => "Latest",
            ScreenMode::Search => "Search",
        }
    }
}
