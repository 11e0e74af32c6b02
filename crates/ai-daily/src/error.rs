//! Error types for the AI daily pipeline.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by pipeline components.
///
/// Most of these never leave their component: collectors, the summarizer and
/// the senders log them and degrade. Only configuration errors reach the top.
#[derive(Debug, Error)]
pub enum Error {
    /// Sources file could not be read.
    #[error("Failed to read config file '{}': {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Sources file is not valid JSON for the expected shape.
    #[error("Failed to parse config file '{}': {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Invalid configuration value.
    #[error("Invalid configuration value for '{key}': {reason}")]
    ConfigValue { key: String, reason: String },

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Feed body was not a valid RSS document.
    #[error("Feed parse error: {0}")]
    Feed(#[from] rss::Error),

    /// GitHub API error
    #[error("GitHub API error: {0}")]
    GitHub(#[from] octocrab::Error),

    /// LLM call failed or returned an unusable response.
    #[error("AI error: {0}")]
    Ai(String),

    /// Email could not be built or delivered.
    #[error("Email error: {0}")]
    Email(String),

    /// Filesystem error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;
