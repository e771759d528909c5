//! Error types for the community level lookup.

use thiserror::Error;

/// Errors raised while fetching or interpreting community level data.
#[derive(Error, Debug)]
pub enum LevelError {
    /// Transport error (connect, timeout, TLS)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Data API answered with a non-success status
    #[error("Data API returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// Response body was not the expected JSON
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Environment configuration could not be read
    #[error("Configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Community level outside low/medium/high
    #[error("Unknown community level: {0}")]
    UnknownLevel(String),
}

pub type LevelResult<T> = Result<T, LevelError>;
