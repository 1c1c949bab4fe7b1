use serde::{Deserialize, Serialize};

/// The case/query pair a ratings store is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueryTarget {
    /// Case identifier.
    pub case_id: u64,
    /// Query identifier.
    pub query_id: u64,
}

impl QueryTarget {
    /// Creates a target for `query_id` inside `case_id`.
    pub fn new(case_id: u64, query_id: u64) -> Self {
        Self { case_id, query_id }
    }
}

impl std::fmt::Display for QueryTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "case {} / query {}", self.case_id, self.query_id)
    }
}

/// HTTP verbs used by the persistence contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestMethod {
    Put,
    Post,
    Delete,
}

impl RequestMethod {
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestMethod::Put => "PUT",
            RequestMethod::Post => "POST",
            RequestMethod::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for RequestMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of a single-document upsert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingBody {
    pub rating: f64,
}

/// Body of a bulk upsert. Document ids travel raw (not transport-encoded).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkRatingBody {
    pub doc_ids: Vec<String>,
    pub rating: f64,
}

/// Body of a bulk delete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkDeleteBody {
    pub doc_ids: Vec<String>,
}
