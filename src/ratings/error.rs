use thiserror::Error;

use crate::persistence::PersistenceError;

#[derive(Debug, Error)]
/// Errors returned by ratings store mutations.
///
/// Any error means nothing was committed: the in-memory value and the version are unchanged.
pub enum RatingsError {
    /// The rating is not a finite number (after text coercion).
    #[error("invalid rating '{value}' for document '{doc_id}': not a number")]
    InvalidRating {
        /// Raw document id.
        doc_id: String,
        /// Rejected value as given.
        value: String,
    },

    /// The persistence round trip failed.
    #[error("persistence round trip failed: {0}")]
    Persistence(#[from] PersistenceError),
}

/// Convenience result type for ratings store operations.
pub type RatingsResult<T> = Result<T, RatingsError>;
