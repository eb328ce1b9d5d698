//! Error types for urlselect

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while fetching, selecting or downloading
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// URL is missing
    #[error("Missing required parameter: url")]
    MissingUrl,

    /// URL has invalid scheme
    #[error("Invalid URL: must start with http:// or https://")]
    InvalidUrlScheme,

    /// URL could not be parsed or joined
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// URL has no host to name the image folder after
    #[error("URL has no host: {0}")]
    MissingHost(String),

    /// Failed to build HTTP client
    #[error("Failed to create HTTP client")]
    ClientBuildError(#[source] reqwest::Error),

    /// Request timed out
    #[error("Request timed out")]
    Timeout,

    /// Failed to connect to server
    #[error("Failed to connect to server: {0}")]
    ConnectError(#[source] reqwest::Error),

    /// Server answered with a non-2xx status
    #[error("Request failed with status code {0}")]
    Status(u16),

    /// Other request error
    #[error("Request failed: {0}")]
    RequestError(String),

    /// CSS selector could not be parsed
    #[error("Invalid CSS selector: {0}")]
    InvalidSelector(String),

    /// Selector matched nothing
    #[error("No elements found matching the given selector.")]
    NoMatches,

    /// Resolved image URL has no path segment to use as a file name
    #[error("Cannot derive a file name from {0}")]
    NoFileName(String),

    /// Image folder could not be created
    #[error("Failed to create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Image bytes could not be written
    #[error("Failed to write {}: {source}", path.display())]
    WriteFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ScrapeError {
    /// Create an error from a reqwest error
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ScrapeError::Timeout
        } else if err.is_connect() {
            ScrapeError::ConnectError(err)
        } else if let Some(status) = err.status() {
            ScrapeError::Status(status.as_u16())
        } else {
            ScrapeError::RequestError(err.to_string())
        }
    }
}
