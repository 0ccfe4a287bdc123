// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Error types for netcrumb
//!
//! Instrumentation errors never reach application code: the trackers catch
//! them and report through the [`Logger`](crate::breadcrumb::Logger). These
//! types surface only from configuration loading, the HTTP host client and
//! breadcrumb sinks.

use thiserror::Error;

/// Result type alias for netcrumb operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for netcrumb
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Request could not be built from a descriptor
    #[error("Invalid request {method} {url}: {reason}")]
    InvalidRequest {
        method: String,
        url: String,
        reason: String,
    },

    /// Breadcrumb sink rejected or failed to record a breadcrumb
    #[error("Breadcrumb sink error: {0}")]
    Sink(String),

    /// Configuration error
    #[error("Configuration error for {key}: {message}")]
    Config { key: String, message: String },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a new sink error
    pub fn sink<S: Into<String>>(msg: S) -> Self {
        Error::Sink(msg.into())
    }

    /// Create a configuration error for a given key
    pub fn config(key: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Config {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Create an invalid request error
    pub fn invalid_request(
        method: impl Into<String>,
        url: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Error::InvalidRequest {
            method: method.into(),
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }

    /// Check if the host client failed at the transport level
    pub fn is_network(&self) -> bool {
        matches!(self, Error::Http(_))
    }

    /// Check if this is a configuration error
    pub fn is_config(&self) -> bool {
        matches!(self, Error::Config { .. })
    }

    /// Get URL if available
    pub fn url(&self) -> Option<&str> {
        match self {
            Error::InvalidRequest { url, .. } => Some(url),
            Error::Http(e) => e.url().map(|u| u.as_str()),
            _ => None,
        }
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Other(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Other(s.to_string())
    }
}
