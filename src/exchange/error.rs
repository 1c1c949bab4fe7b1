use thiserror::Error;

use crate::convert::FormatError;

#[derive(Debug, Error)]
/// Errors returned by the import/export surface and the ratings repository.
pub enum ExchangeError {
    /// `file_format` names no known format.
    #[error("unsupported {direction} format '{format}'")]
    UnsupportedFormat {
        /// `import` or `export`.
        direction: &'static str,
        format: String,
    },

    /// The payload field the selected format reads is absent.
    #[error("missing '{field}' for '{format}' import")]
    MissingPayload {
        field: &'static str,
        format: &'static str,
    },

    /// The payload does not have the expected shape.
    #[error("{0}")]
    Format(#[from] FormatError),

    /// A rating label is not numeric.
    #[error("rating '{label}' for document '{doc_id}' in query '{query_text}' is not a number")]
    InvalidRatingLabel {
        query_text: String,
        doc_id: String,
        label: String,
    },

    /// A stored rating is not a finite number.
    #[error("rating for document '{doc_id}' must be a finite number")]
    InvalidRating { doc_id: String },

    #[error("case {case_id} not found")]
    CaseNotFound { case_id: u64 },

    #[error("query {query_id} not found in case {case_id}")]
    QueryNotFound { case_id: u64, query_id: u64 },
}

/// Convenience result type for exchange operations.
pub type ExchangeResult<T> = Result<T, ExchangeError>;
