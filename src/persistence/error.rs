use thiserror::Error;

#[derive(Debug, Error)]
/// Errors returned by a ratings persistence round trip.
pub enum PersistenceError {
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {message}")]
    ClientBuild {
        /// Error message.
        message: String,
    },

    /// The request never produced a response (connect, timeout, body encoding).
    #[error("request {method} '{url}' failed: {message}")]
    RequestFailed {
        /// HTTP method.
        method: &'static str,
        /// Request URL (or path for in-process backends).
        url: String,
        /// Error message.
        message: String,
    },

    /// The backend answered with a non-success status.
    #[error("request {method} '{url}' returned status {status}: {body}")]
    UnexpectedStatus {
        /// HTTP method.
        method: &'static str,
        /// Request URL.
        url: String,
        /// Status code.
        status: u16,
        /// Response body (may be empty).
        body: String,
    },
}

/// Convenience result type for persistence operations.
pub type PersistenceResult<T> = Result<T, PersistenceError>;
