//! Persistent user configuration.
//!
//! The config is a two-field JSON document stored in the platform config
//! directory:
//!
//! ```text
//! { "apikey": "<newsapi.org key>", "language": "en" }
//! ```
//!
//! Reading never fails: a missing or unreadable file means the user has not set
//! anything yet, so [`load`] falls back to [`NewsConfig::default`].

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Directory name under the platform config dir.
const APP_DIR: &str = env!("CARGO_PKG_NAME");
const CONFIG_FILE: &str = "config.json";
pub const DEFAULT_LANGUAGE: &str = "en";

/// API key and preferred language.
///
/// An empty `apikey` means "unset". `language` is an ISO 639-1 code and is
/// never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsConfig {
    pub apikey: String,
    pub language: String,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            apikey: String::new(),
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

impl NewsConfig {
    pub fn with_apikey(mut self, apikey: impl Into<String>) -> Self {
        self.apikey = apikey.into();
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self.normalized()
    }

    fn normalized(mut self) -> Self {
        if self.language.is_empty() {
            self.language = DEFAULT_LANGUAGE.to_string();
        }
        self
    }
}

/// `<config dir>/simple_cli_news/config.json`
pub fn default_config_path() -> Result<PathBuf, Error> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
        .ok_or(Error::NoConfigDir)
}

/// Load the config at `path`, or the defaults if it can't be read or parsed.
#[instrument(level = "debug", skip_all, fields(path = %path.display()))]
pub fn load(path: &Path) -> NewsConfig {
    let contents = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            debug!(error = %e, "No readable config; using defaults");
            return NewsConfig::default();
        }
    };

    match serde_json::from_str::<NewsConfig>(&contents) {
        Ok(config) => config.normalized(),
        Err(e) => {
            debug!(error = %e, "Config is not valid JSON; using defaults");
            NewsConfig::default()
        }
    }
}

/// Write `config` to `path`, replacing whatever was there.
///
/// Missing parent directories are created first.
#[instrument(level = "debug", skip_all, fields(path = %path.display()))]
pub fn save(config: &NewsConfig, path: &Path) -> Result<(), Error> {
    let write_err = |source| Error::ConfigWrite {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    let json = serde_json::to_string(config).map_err(|e| write_err(e.into()))?;
    fs::write(path, json).map_err(write_err)?;

    info!("Saved config");
    Ok(())
}
