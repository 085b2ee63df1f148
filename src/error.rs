//! Unified error types.

use std::time::Duration;
use thiserror::Error;

/// Top-level error.
#[derive(Error, Debug)]
pub enum QuoteError {
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl QuoteError {
    /// Short label used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            QuoteError::Fetch(e) => e.kind(),
            QuoteError::Storage(_) => "storage",
            QuoteError::Validation(_) => "validation",
            QuoteError::Config(_) => "config",
        }
    }

    /// Whether this is an upstream "asset not found" outcome.
    pub fn is_not_found(&self) -> bool {
        matches!(self, QuoteError::Fetch(FetchError::NotFound(_)))
    }
}

/// Errors produced while obtaining data for one request key.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unavailable after {attempts} attempts: {last_error}")]
    Unavailable { attempts: u32, last_error: String },
}

impl FetchError {
    /// Transport and parse failures may succeed on a second try; a missing
    /// asset will not.
    pub fn is_retryable(&self) -> bool {
        matches!(self, FetchError::Transport(_) | FetchError::Parse(_))
    }

    /// Short label used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Transport(_) => "transport",
            FetchError::Parse(_) => "parse",
            FetchError::NotFound(_) => "not_found",
            FetchError::Unavailable { .. } => "unavailable",
        }
    }
}

/// Network-level errors.
#[derive(Error, Debug)]
pub enum TransportError {
    #[cfg(feature = "http")]
    #[error("Request failed: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Server returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Timed out after {0:?}")]
    Timeout(Duration),
}

/// Search history persistence errors.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid stored value: {0}")]
    Decode(String),
}
