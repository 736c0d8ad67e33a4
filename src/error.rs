use crate::markup::MarkupError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading recipes or testing a page's tags
#[derive(Error, Debug)]
pub enum SiteError {
    /// Recipe markup could not be tokenized
    #[error("Failed to parse recipe markup: {0}")]
    Markup(#[from] MarkupError),

    /// Failed to read a recipe file or directory
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A recipe file was read but could not be parsed
    #[error("Failed to parse recipe {}: {source}", .path.display())]
    Recipe {
        path: PathBuf,
        #[source]
        source: Box<SiteError>,
    },

    /// Failed to fetch a page
    #[error("Failed to fetch URL: {0}")]
    Fetch(#[from] reqwest::Error),

    /// The page answered with a non-success status
    #[error("Request failed with HTTP status {0}")]
    HttpStatus(u16),

    /// The URL is malformed or not http(s)
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Output serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
