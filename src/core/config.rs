//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.cinescope/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::ScreenMode;
use crate::catalog::tmdb::DEFAULT_TMDB_BASE_URL;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CinescopeConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub default_mode: Option<ScreenMode>,
    pub include_adult: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CatalogConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub mode: ScreenMode,
    pub include_adult: bool,
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout: Duration,
}

impl ResolvedConfig {
    /// The API key, or `MissingApiKey` if no layer supplied one.
    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        self.api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    MissingApiKey,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
            ConfigError::MissingApiKey => write!(
                f,
                "no TMDB API key (set TMDB_API_KEY or [catalog] api_key in ~/.cinescope/config.toml)"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.cinescope/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".cinescope").join("config.toml"))
}

/// Load config from `~/.cinescope/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `CinescopeConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<CinescopeConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(CinescopeConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(CinescopeConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config = parse_config(&contents)?;
    info!("Loaded config from {}", path.display());
    Ok(config)
}

pub fn parse_config(contents: &str) -> Result<CinescopeConfig, ConfigError> {
    let config: CinescopeConfig = toml::from_str(contents).map_err(ConfigError::Parse)?;
    debug!(
        "Config: mode={:?}, include_adult={:?}, base_url={:?}, api_key set={}",
        config.general.default_mode,
        config.general.include_adult,
        config.catalog.base_url,
        config.catalog.api_key.is_some()
    );
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &PathBuf) {
    let default_content = r#"# Cinescope Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# default_mode = "latest"            # "latest" or "search"
# include_adult = false

# [catalog]
# api_key = "eyJhbGciOi..."          # TMDB read access token, or set TMDB_API_KEY
# base_url = "https://api.themoviedb.org/3"
# timeout_secs = 15
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `cli_mode` is `None` when the flag was not given. `cli_include_adult`
/// can only switch adult content on.
pub fn resolve(
    config: &CinescopeConfig,
    cli_mode: Option<ScreenMode>,
    cli_include_adult: bool,
) -> ResolvedConfig {
    // Mode: CLI → env → config → default
    let mode = cli_mode
        .or_else(|| {
            std::env::var("CINESCOPE_MODE")
                .ok()
                .and_then(|value| parse_mode(&value))
        })
        .or(config.general.default_mode)
        .unwrap_or_default();

    let include_adult = cli_include_adult || config.general.include_adult.unwrap_or(false);

    // API key: env → config
    let api_key = std::env::var("TMDB_API_KEY")
        .ok()
        .or_else(|| config.catalog.api_key.clone());

    // Base URL: env → config → default
    let base_url = std::env::var("TMDB_BASE_URL")
        .ok()
        .or_else(|| config.catalog.base_url.clone())
        .unwrap_or_else(|| DEFAULT_TMDB_BASE_URL.to_string());

    ResolvedConfig {
        mode,
        include_adult,
        api_key,
        base_url,
        timeout: Duration::from_secs(
            config.catalog.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
        ),
    }
}

fn parse_mode(value: &str) -> Option<ScreenMode> {
    match value.trim().to_ascii_lowercase().as_str() {
        "latest" => Some(ScreenMode::Latest),
        "search" => Some(ScreenMode::Search),
        other => {
            warn!("Ignoring unknown CINESCOPE_MODE value: {}", other);
            None
        }
    }
}
