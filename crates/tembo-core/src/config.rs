//! Client configuration.
//!
//! Loaded from `$XDG_CONFIG_HOME/tembo/config.toml`; a missing file means
//! defaults. `TEMBO_API_URL` overrides the backend URL.
//!
//! ```toml
//! [api]
//! base_url = "https://api.example.com"
//!
//! [cache]
//! stale_secs = 1800
//! gc_secs = 2100
//! max_entries = 256
//!
//! [session]
//! path = "/home/me/.local/state/tembo/session.json"
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cache::QueryCache;
use crate::error::{AdminError, Result};

pub const API_URL_ENV: &str = "TEMBO_API_URL";
const DEFAULT_API_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub cache: CacheConfig,
    pub session: SessionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
        }
    }
}

/// Read-view cache windows, in seconds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CacheConfig {
    pub stale_secs: u64,
    pub gc_secs: u64,
    pub max_entries: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            stale_secs: 30 * 60,
            gc_secs: 35 * 60,
            max_entries: 256,
        }
    }
}

impl CacheConfig {
    pub fn build(&self) -> QueryCache {
        QueryCache::new(
            self.max_entries,
            Duration::from_secs(self.stale_secs),
            Duration::from_secs(self.gc_secs),
        )
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SessionConfig {
    /// Session file; the XDG state directory when unset
    pub path: Option<PathBuf>,
}

impl Config {
    /// `$XDG_CONFIG_HOME/tembo/config.toml`.
    pub fn default_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("tembo")
            .place_config_file("config.toml")
            .map_err(|e| AdminError::XdgDirectory(e.to_string()))
    }

    /// Parse the file at `path`; a missing file gives the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(AdminError::file_system(path, e)),
        };
        Self::parse(&contents).map_err(|e| AdminError::Configuration {
            message: format!("{}: {e}", path.display()),
        })
    }

    pub fn parse(contents: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Apply `TEMBO_API_URL` if it is set and non-empty.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                log::debug!("API URL overridden by {API_URL_ENV}");
                self.api.base_url = url.trim().to_string();
            }
        }
        self
    }
}
