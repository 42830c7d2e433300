//! Error types for the routing module

use thiserror::Error;

/// Errors that can occur during routing operations
#[derive(Debug, Error)]
pub enum RoutingError {
    /// The request carries contradictory manual overrides. This is a caller
    /// logic bug, never resolved silently by the engine.
    #[error("Invalid routing request: {reason}")]
    InvalidRequest { reason: String },

    #[error("Configuration error: {key} - {reason}")]
    ConfigurationError { key: String, reason: String },

    #[error("Failed to read routing config {path}: {source}")]
    ConfigIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse routing config: {source}")]
    ConfigParse {
        #[source]
        source: toml::de::Error,
    },
}

/// Result type for routing operations
pub type RoutingResult<T> = Result<T, RoutingError>;
