//! Configuration error types.

use thiserror::Error;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Port value is outside valid range (1-65535).
    #[error("invalid port '{value}': must be between 1 and 65535")]
    InvalidPort { value: String },

    /// Port string could not be parsed as a number.
    #[error("failed to parse port '{value}': {source}")]
    PortParseError {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// Bind address string could not be parsed.
    #[error("failed to parse bind address '{value}': {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },

    /// API base URL is not an `http(s)://` URL.
    #[error("invalid API base URL '{value}': must start with http:// or https://")]
    InvalidBaseUrl { value: String },

    /// Request timeout is not a positive number of seconds.
    #[error("invalid request timeout '{value}': must be a positive number of seconds")]
    InvalidTimeout { value: String },

    /// A setting that must not be blank is blank.
    #[error("{name} must not be empty")]
    EmptyValue { name: &'static str },
}
