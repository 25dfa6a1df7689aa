//! Builder for creating and configuring Dashboard instances.

use std::path::{Path, PathBuf};

use super::Dashboard;
use crate::client::ApiClient;
use crate::config::Config;
use crate::error::Result;
use crate::session::{SessionStore, SessionTokens};

/// Builder for creating and configuring Dashboard instances.
///
/// Settings are resolved in order: explicit builder values, then
/// `TEMBO_API_URL`, then the config file, then defaults.
#[derive(Debug, Clone, Default)]
pub struct DashboardBuilder {
    config: Option<Config>,
    config_path: Option<PathBuf>,
    api_url: Option<String>,
    session_path: Option<PathBuf>,
}

impl DashboardBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an already loaded configuration instead of reading a file.
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets a custom config file path.
    ///
    /// If not specified, uses `$XDG_CONFIG_HOME/tembo/config.toml`.
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.config_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Overrides the backend URL.
    pub fn with_api_url<S: AsRef<str>>(mut self, url: Option<S>) -> Self {
        if let Some(url) = url {
            self.api_url = Some(url.as_ref().to_string());
        }
        self
    }

    /// Sets a custom session file path.
    ///
    /// If not specified, uses `session.path` from the config, then
    /// `$XDG_STATE_HOME/tembo/session.json`.
    pub fn with_session_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.session_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Builds the configured dashboard, restoring any saved session.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Configuration` if the config file or API URL is
    /// invalid, `AdminError::XdgDirectory` if a default path cannot be
    /// resolved, and `AdminError::Serialization` for a corrupt session file.
    pub fn build(self) -> Result<Dashboard> {
        let config = match self.config {
            Some(config) => config,
            None => {
                let path = match self.config_path {
                    Some(path) => path,
                    None => Config::default_path()?,
                };
                Config::load(&path)?
            }
        };
        let mut config = config.with_env_overrides();
        if let Some(url) = self.api_url {
            config.api.base_url = url;
        }

        let session_path = match self.session_path.or_else(|| config.session.path.clone()) {
            Some(path) => path,
            None => SessionStore::default_path()?,
        };
        let store = SessionStore::new(session_path);
        let session = store.load()?;
        let tokens = session
            .as_ref()
            .map(|context| context.tokens.clone())
            .unwrap_or_else(SessionTokens::default);

        let client = ApiClient::new(&config.api.base_url, tokens)?;
        log::debug!(
            "Dashboard for {} ({})",
            client.base_url(),
            if session.is_some() {
                "signed in"
            } else {
                "signed out"
            }
        );

        Ok(Dashboard::new(client, config.cache.build(), store, session))
    }
}
