use serde::{Deserialize, Serialize};

/// One stored `doc_id -> rating` entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRating {
    pub doc_id: String,
    pub rating: f64,
}

/// A rating as returned by the upsert endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingRecord {
    pub query_id: u64,
    pub doc_id: String,
    pub rating: f64,
}

/// One query of a case with its ratings in insertion order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuerySnapshot {
    pub query_id: u64,
    pub query_text: String,
    pub ratings: Vec<StoredRating>,
}

impl QuerySnapshot {
    pub fn new(query_id: u64, query_text: impl Into<String>) -> Self {
        Self {
            query_id,
            query_text: query_text.into(),
            ratings: Vec::new(),
        }
    }

    pub fn rating(&self, doc_id: &str) -> Option<f64> {
        self.ratings
            .iter()
            .find(|r| r.doc_id == doc_id)
            .map(|r| r.rating)
    }

    /// Sets the rating of `doc_id`, keeping an existing entry's position.
    pub fn upsert(&mut self, doc_id: &str, rating: f64) {
        match self.ratings.iter_mut().find(|r| r.doc_id == doc_id) {
            Some(existing) => existing.rating = rating,
            None => self.ratings.push(StoredRating {
                doc_id: doc_id.to_string(),
                rating,
            }),
        }
    }

    /// Removes `doc_id`. Returns `true` if it was rated.
    pub fn remove(&mut self, doc_id: &str) -> bool {
        let before = self.ratings.len();
        self.ratings.retain(|r| r.doc_id != doc_id);
        self.ratings.len() != before
    }
}

/// A case: an optional index name and its queries in creation order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseSnapshot {
    pub case_id: u64,
    pub index_name: Option<String>,
    pub queries: Vec<QuerySnapshot>,
}

impl CaseSnapshot {
    pub fn new(case_id: u64, index_name: Option<String>) -> Self {
        Self {
            case_id,
            index_name,
            queries: Vec::new(),
        }
    }

    pub fn query(&self, query_id: u64) -> Option<&QuerySnapshot> {
        self.queries.iter().find(|q| q.query_id == query_id)
    }

    pub fn query_mut(&mut self, query_id: u64) -> Option<&mut QuerySnapshot> {
        self.queries.iter_mut().find(|q| q.query_id == query_id)
    }

    pub fn query_by_text(&self, query_text: &str) -> Option<&QuerySnapshot> {
        self.queries.iter().find(|q| q.query_text == query_text)
    }

    pub fn rating_count(&self) -> usize {
        self.queries.iter().map(|q| q.ratings.len()).sum()
    }
}

/// A validated import row: the label has already been read as a number.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedRating {
    pub query_text: String,
    pub doc_id: String,
    pub rating: f64,
}

/// Outcome of an import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub queries_created: usize,
    pub ratings_imported: usize,
    pub cleared: bool,
}
