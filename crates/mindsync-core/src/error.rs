//! Core error types for mindsync-core.
//!
//! Backend calls have exactly one failure kind, [`RequestError`]; callers
//! never branch on why a request failed, the detail is only for logs.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for mindsync-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Backend request errors
    #[error(transparent)]
    Request(#[from] RequestError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A backend call did not produce a usable response.
///
/// Covers non-2xx statuses, transport failures and undecodable bodies alike.
#[derive(Error, Debug)]
#[error("{endpoint} request failed: {reason}")]
pub struct RequestError {
    /// Endpoint path, e.g. `detect_mood`.
    pub endpoint: &'static str,
    /// HTTP status when the server answered.
    pub status: Option<u16>,
    /// Human-readable cause, for diagnostics only.
    pub reason: String,
}

impl RequestError {
    pub(crate) fn status(endpoint: &'static str, status: reqwest::StatusCode) -> Self {
        Self {
            endpoint,
            status: Some(status.as_u16()),
            reason: format!("HTTP {status}"),
        }
    }

    pub(crate) fn transport(endpoint: &'static str, err: reqwest::Error) -> Self {
        Self {
            endpoint,
            status: err.status().map(|s| s.as_u16()),
            reason: err.to_string(),
        }
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

    /// Unknown dot-path key
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// No home directory to put the config in
    #[error("cannot determine configuration directory")]
    NoConfigDir,
}

/// Validation errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// Out of bounds
    #[error("Index {index} out of bounds for {collection} (length: {len})")]
    OutOfBounds {
        collection: String,
        index: usize,
        len: usize,
    },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
