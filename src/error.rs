// src/error.rs

//! Unified error handling for the converter.

use thiserror::Error;

/// Result type alias for converter operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed (connection, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("HTTP status {status} from {url}")]
    HttpStatus { url: String, status: u16 },

    /// The DBLP export could not be parsed
    #[error("Invalid DBLP export {path}: {source}")]
    Input {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Landing page has no anchor with the expected label
    #[error("No '{label}' link on {url}")]
    LinkNotFound { url: String, label: String },

    /// Fetched body contains no BibTeX record
    #[error("No BibTeX record in response from {url}")]
    NoCitationFound { url: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// One or more inputs of a run produced no output
    #[error("{failed} of {total} inputs failed")]
    BatchFailed { failed: usize, total: usize },
}

impl AppError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a status error for a response.
    pub fn status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// True for failures at the network boundary.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Http(_) | Self::HttpStatus { .. })
    }
}
