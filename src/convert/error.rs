use thiserror::Error;

/// Where in an external document a problem was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// The document root.
    Root,
    /// A query entry of a hierarchical document.
    Query {
        index: usize,
        query_text: Option<String>,
    },
    /// A record of a flat judgment list.
    Record { index: usize },
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Location::Root => f.write_str("document root"),
            Location::Query {
                index,
                query_text: Some(text),
            } => write!(f, "query #{} ('{}')", index, text),
            Location::Query {
                index,
                query_text: None,
            } => write!(f, "query #{}", index),
            Location::Record { index } => write!(f, "record #{}", index),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
/// Errors from reading an external judgment document.
pub enum FormatError {
    #[error("missing field '{field}' in {location}")]
    MissingField {
        field: &'static str,
        location: Location,
    },

    #[error("field '{field}' in {location} must be {expected}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
        location: Location,
    },

    #[error("invalid JSON: {message}")]
    InvalidJson { message: String },
}

impl FormatError {
    pub fn location(&self) -> Option<&Location> {
        match self {
            FormatError::MissingField { location, .. }
            | FormatError::InvalidField { location, .. } => Some(location),
            FormatError::InvalidJson { .. } => None,
        }
    }
}

/// Convenience result type for format conversion.
pub type FormatResult<T> = Result<T, FormatError>;
