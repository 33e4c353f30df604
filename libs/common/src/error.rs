//! Custom error types for the common library
//!
//! This module defines the failures shared by every crate of the console:
//! request failures raised by the gateway, token storage failures and
//! configuration failures.

use thiserror::Error;

/// Failure of a single backend call made through the gateway
#[derive(Error, Debug)]
pub enum RequestError {
    /// The backend could not be reached or the connection broke mid-response
    #[error("Network error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The backend answered 401; the token is already cleared and the
    /// application already sent to the login entry point
    #[error("Unauthorized")]
    Unauthorized,

    /// Any other non-2xx answer
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// A 2xx answer whose body is not the expected JSON
    #[error("Invalid response body: {0}")]
    Decode(#[source] serde_json::Error),

    /// The stored token could not be read or cleared
    #[error("Token storage error: {0}")]
    Storage(#[from] StorageError),

    /// The endpoint path could not be joined onto the base URL
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),
}

impl RequestError {
    /// HTTP status carried by this failure, when the backend answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            RequestError::Unauthorized => Some(401),
            RequestError::Rejected { status, .. } => Some(*status),
            RequestError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether this failure was handled by the global login redirect
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, RequestError::Unauthorized)
    }
}

/// Custom error type for token storage
#[derive(Error, Debug)]
pub enum StorageError {
    /// Reading, writing or removing the token file failed
    #[error("Token file error: {0}")]
    Io(#[from] std::io::Error),
}

/// Custom error type for configuration loading
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A configuration source could not be read or deserialized
    #[error("Configuration error: {0}")]
    Load(#[from] config::ConfigError),

    /// The backend base URL is not an absolute http(s) URL
    #[error("Invalid API base URL: {0}")]
    InvalidBaseUrl(String),
}

/// Type alias for Result with RequestError
pub type RequestResult<T> = Result<T, RequestError>;

/// Type alias for Result with StorageError
pub type StorageResult<T> = Result<T, StorageError>;

/// Type alias for Result with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;
