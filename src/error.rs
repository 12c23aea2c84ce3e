//! Error types for Leadbell
//!
//! This module defines all error types used throughout the client,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for Leadbell operations
///
/// This enum encompasses all possible errors that can occur while talking
/// to the CRM backend, loading configuration, and persisting the local
/// session record.
#[derive(Error, Debug)]
pub enum LeadbellError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Backend API errors (unexpected status, malformed response)
    #[error("API error: {0}")]
    Api(String),

    /// Authentication errors (e.g., 401 Unauthorized)
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Session persistence errors
    #[error("Session storage error: {0}")]
    Session(String),

    /// Notification feed errors (scheduling, state)
    #[error("Feed error: {0}")]
    Feed(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for Leadbell operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;
