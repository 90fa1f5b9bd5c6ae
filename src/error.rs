//! Error taxonomy shared by the adapters, the lyric fetcher and the chart writer.

use std::fmt::Display;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Duration string that is not `MM:SS`.
    #[error("Invalid duration {0:?}: expected whole seconds or MM:SS")]
    Format(String),

    /// Flat-file record chunk without five non-blank lines.
    #[error("Malformed entry #{index}: {lines:?}")]
    Structural { index: usize, lines: Vec<String> },

    /// Catalog reference that does not point at a playlist.
    #[error("{0} is not a playlist link")]
    Validation(String),

    /// Authentication, network or quota failure from a remote provider.
    #[error("{provider} request failed: {message}")]
    Provider {
        provider: &'static str,
        message: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn provider(provider: &'static str, err: impl Display) -> Self {
        Error::Provider {
            provider,
            message: err.to_string(),
        }
    }
}
