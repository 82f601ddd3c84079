//! Core error types for focusboard-core.
//!
//! Synchronization failures are split by where they happened: before any
//! request (validation), on the wire (transport), or in the server's answer
//! (rejected / undecodable). A task with no rendered node is not an error.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for focusboard-core. Host commands report through it.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Task synchronization errors
    #[error("Sync error: {0}")]
    Sync(#[from] SyncError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors produced while talking to the task backend.
#[derive(Error, Debug)]
pub enum SyncError {
    /// Description was empty after trimming; no request was sent.
    #[error("Task description is required")]
    EmptyDescription,

    /// The request never produced a readable response.
    #[error("Transport error: {0}")]
    Transport(String),

    /// HTTP client failure.
    #[cfg(feature = "http")]
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered but refused the operation.
    #[error("{operation} rejected by server: {message}")]
    Rejected {
        operation: &'static str,
        message: String,
    },

    /// The response body was not the expected JSON.
    #[error("Unexpected response (HTTP {status}): {source}")]
    Decode {
        status: u16,
        #[source]
        source: serde_json::Error,
    },

    /// Backend base URL could not be joined with an endpoint path.
    #[error("Invalid backend URL '{0}'")]
    InvalidUrl(String),
}

impl SyncError {
    pub(crate) fn rejected(operation: &'static str, message: Option<String>) -> Self {
        SyncError::Rejected {
            operation,
            message: message.unwrap_or_else(|| "no error message".to_string()),
        }
    }

    /// Whether the request reached the server and got an answer.
    pub fn is_application_failure(&self) -> bool {
        matches!(self, SyncError::Rejected { .. })
    }
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Could not locate or create the configuration directory
    #[error("Configuration directory unavailable: {0}")]
    NoDataDir(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
