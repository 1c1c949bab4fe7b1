//! Server-side ratings storage.
//!
//! [`RatingsRepository`] is the seam between the gateway and durable storage.
//! [`MemoryRatingsRepository`] keeps everything in one lock; every method takes it once, so
//! readers see either the state before a call or the state after it.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::{debug, info};

use super::error::{ExchangeError, ExchangeResult};
use super::model::{CaseSnapshot, ImportSummary, ImportedRating, QuerySnapshot, RatingRecord};

#[async_trait]
/// Storage operations behind the ratings API.
pub trait RatingsRepository: Send + Sync {
    /// Creates `case_id`, or updates its index name if it exists.
    async fn create_case(&self, case_id: u64, index_name: Option<String>)
    -> ExchangeResult<CaseSnapshot>;

    /// Adds a query to a case and returns its id. A query with the same text is reused.
    async fn add_query(&self, case_id: u64, query_text: &str) -> ExchangeResult<u64>;

    /// Point-in-time copy of a case.
    async fn case_snapshot(&self, case_id: u64) -> ExchangeResult<CaseSnapshot>;

    async fn upsert_rating(
        &self,
        case_id: u64,
        query_id: u64,
        doc_id: &str,
        rating: f64,
    ) -> ExchangeResult<RatingRecord>;

    /// Removes a rating. Returns `true` if one existed.
    async fn delete_rating(&self, case_id: u64, query_id: u64, doc_id: &str)
    -> ExchangeResult<bool>;

    /// Sets every listed document to `rating`. Returns the number written.
    async fn bulk_upsert_ratings(
        &self,
        case_id: u64,
        query_id: u64,
        doc_ids: &[String],
        rating: f64,
    ) -> ExchangeResult<usize>;

    /// Removes every listed document's rating. Returns the number removed.
    async fn bulk_delete_ratings(
        &self,
        case_id: u64,
        query_id: u64,
        doc_ids: &[String],
    ) -> ExchangeResult<usize>;

    /// Writes imported ratings, matching queries by text and creating missing ones.
    ///
    /// With `clear_existing`, every rating of the case is removed first, in the same atomic
    /// step as the insert.
    async fn import_ratings(
        &self,
        case_id: u64,
        ratings: Vec<ImportedRating>,
        clear_existing: bool,
    ) -> ExchangeResult<ImportSummary>;
}

/// In-process repository.
pub struct MemoryRatingsRepository {
    cases: RwLock<HashMap<u64, CaseSnapshot>>,
    next_query_id: AtomicU64,
}

impl MemoryRatingsRepository {
    pub fn new() -> Self {
        Self {
            cases: RwLock::new(HashMap::new()),
            next_query_id: AtomicU64::new(1),
        }
    }

    pub fn case_count(&self) -> usize {
        self.cases.read().len()
    }

    fn allocate_query_id(&self) -> u64 {
        self.next_query_id.fetch_add(1, Ordering::Relaxed)
    }

    fn with_query<T>(
        &self,
        case_id: u64,
        query_id: u64,
        f: impl FnOnce(&mut QuerySnapshot) -> T,
    ) -> ExchangeResult<T> {
        let mut cases = self.cases.write();
        let case = cases
            .get_mut(&case_id)
            .ok_or(ExchangeError::CaseNotFound { case_id })?;
        let query = case
            .query_mut(query_id)
            .ok_or(ExchangeError::QueryNotFound { case_id, query_id })?;
        Ok(f(query))
    }
}

impl Default for MemoryRatingsRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn check_finite(doc_id: &str, rating: f64) -> ExchangeResult<()> {
    if rating.is_finite() {
        Ok(())
    } else {
        Err(ExchangeError::InvalidRating {
            doc_id: doc_id.to_string(),
        })
    }
}

#[async_trait]
impl RatingsRepository for MemoryRatingsRepository {
    async fn create_case(
        &self,
        case_id: u64,
        index_name: Option<String>,
    ) -> ExchangeResult<CaseSnapshot> {
        let mut cases = self.cases.write();
        let case = cases
            .entry(case_id)
            .or_insert_with(|| CaseSnapshot::new(case_id, None));
        if index_name.is_some() {
            case.index_name = index_name;
        }
        Ok(case.clone())
    }

    async fn add_query(&self, case_id: u64, query_text: &str) -> ExchangeResult<u64> {
        let mut cases = self.cases.write();
        let case = cases
            .get_mut(&case_id)
            .ok_or(ExchangeError::CaseNotFound { case_id })?;

        if let Some(existing) = case.query_by_text(query_text) {
            return Ok(existing.query_id);
        }

        let query_id = self.allocate_query_id();
        case.queries.push(QuerySnapshot::new(query_id, query_text));
        debug!(case_id, query_id, "Query created");
        Ok(query_id)
    }

    async fn case_snapshot(&self, case_id: u64) -> ExchangeResult<CaseSnapshot> {
        self.cases
            .read()
            .get(&case_id)
            .cloned()
            .ok_or(ExchangeError::CaseNotFound { case_id })
    }

    async fn upsert_rating(
        &self,
        case_id: u64,
        query_id: u64,
        doc_id: &str,
        rating: f64,
    ) -> ExchangeResult<RatingRecord> {
        check_finite(doc_id, rating)?;
        self.with_query(case_id, query_id, |query| query.upsert(doc_id, rating))?;
        Ok(RatingRecord {
            query_id,
            doc_id: doc_id.to_string(),
            rating,
        })
    }

    async fn delete_rating(
        &self,
        case_id: u64,
        query_id: u64,
        doc_id: &str,
    ) -> ExchangeResult<bool> {
        self.with_query(case_id, query_id, |query| query.remove(doc_id))
    }

    async fn bulk_upsert_ratings(
        &self,
        case_id: u64,
        query_id: u64,
        doc_ids: &[String],
        rating: f64,
    ) -> ExchangeResult<usize> {
        if let Some(first) = doc_ids.first() {
            check_finite(first, rating)?;
        }
        self.with_query(case_id, query_id, |query| {
            for doc_id in doc_ids {
                query.upsert(doc_id, rating);
            }
            doc_ids.len()
        })
    }

    async fn bulk_delete_ratings(
        &self,
        case_id: u64,
        query_id: u64,
        doc_ids: &[String],
    ) -> ExchangeResult<usize> {
        self.with_query(case_id, query_id, |query| {
            doc_ids.iter().filter(|doc_id| query.remove(doc_id)).count()
        })
    }

    async fn import_ratings(
        &self,
        case_id: u64,
        ratings: Vec<ImportedRating>,
        clear_existing: bool,
    ) -> ExchangeResult<ImportSummary> {
        for imported in &ratings {
            check_finite(&imported.doc_id, imported.rating)?;
        }

        let mut cases = self.cases.write();
        let case = cases
            .get_mut(&case_id)
            .ok_or(ExchangeError::CaseNotFound { case_id })?;

        if clear_existing {
            for query in &mut case.queries {
                query.ratings.clear();
            }
        }

        let mut summary = ImportSummary {
            cleared: clear_existing,
            ..ImportSummary::default()
        };
        for imported in ratings {
            let position = case
                .queries
                .iter()
                .position(|q| q.query_text == imported.query_text);
            let query = match position {
                Some(idx) => &mut case.queries[idx],
                None => {
                    let query_id = self.allocate_query_id();
                    case.queries
                        .push(QuerySnapshot::new(query_id, imported.query_text.as_str()));
                    summary.queries_created += 1;
                    let last = case.queries.len() - 1;
                    &mut case.queries[last]
                }
            };
            query.upsert(&imported.doc_id, imported.rating);
            summary.ratings_imported += 1;
        }

        info!(
            case_id,
            ratings = summary.ratings_imported,
            queries_created = summary.queries_created,
            cleared = summary.cleared,
            "Ratings imported"
        );
        Ok(summary)
    }
}
