//! Error types for the sprint pipeline.

use thiserror::Error;

/// Top-level error type for sprint operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The completion provider rejected or failed the request.
    #[error("provider error {status} {status_text}: {}", message.as_deref().unwrap_or("no message"))]
    Provider {
        /// HTTP status code returned by the provider.
        status: u16,
        /// HTTP status text.
        status_text: String,
        /// Provider-supplied error message, when the payload carried one.
        message: Option<String>,
    },

    /// HTTP transport failure before a provider response was received.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Model output could not be parsed as JSON, even after fenced-block recovery.
    #[error("malformed JSON output: {0}")]
    Json(#[from] serde_json::Error),

    /// Model output could not be parsed as YAML.
    #[error("malformed YAML output: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO error while scaffolding or persisting artifacts.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Git operation failed.
    #[error("git operation failed: {0}")]
    Git(String),

    /// GitHub API operation failed.
    #[error("GitHub operation failed: {0}")]
    GitHub(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for sprint operations.
pub type Result<T> = std::result::Result<T, Error>;
