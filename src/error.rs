//! Error types surfaced by the client.
//!
//! A missing or corrupt config file is not represented here: [`crate::config::load`]
//! recovers from it locally. An empty result set is not an error either; the
//! caller decides how to report it.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that end the current invocation.
#[derive(Debug, Error)]
pub enum Error {
    /// newsapi.org answered with HTTP 401.
    #[error("Apikey is invalid. Please set a valid apikey with '{} -a [apikey from newsapi.org]'", env!("CARGO_PKG_NAME"))]
    Authentication,

    /// newsapi.org answered with its `{"status":"error"}` envelope.
    #[error("newsapi.org rejected the request ({code}): {message}")]
    Api { code: String, message: String },

    /// The request could not be sent or the body could not be read.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The body did not match the expected payload.
    #[error("unexpected response from newsapi.org: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("couldn't write config to {}: {source}", .path.display())]
    ConfigWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("couldn't find a config directory for this platform; pass --config <path>")]
    NoConfigDir,
}

impl Error {
    /// Short machine-readable name, used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Authentication => "authentication",
            Self::Api { .. } => "api",
            Self::Transport(_) => "transport",
            Self::Decode(_) => "decode",
            Self::ConfigWrite { .. } => "config_write",
            Self::NoConfigDir => "no_config_dir",
        }
    }
}
