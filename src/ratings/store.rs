//! Versioned client-side ratings cache for one query.
//!
//! A [`RatingsStore`] is seeded from a `doc_id -> rating` mapping when a rating session opens
//! and dropped when it ends. Mutations are pessimistic: the persistence round trip runs first
//! and the in-memory value and [`Version`] change only after it succeeds. The state lock is
//! never held across that await, so concurrent mutations of one document commit in the order
//! their round trips resolve.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, instrument, warn};

use super::error::{RatingsError, RatingsResult};
use super::rateable::{Identified, RateableDoc};
use super::ranking::RatingsSnapshot;
use super::types::{RankedDoc, Rating, RawRating, Version};
use crate::codec::path_segment_for;
use crate::persistence::{QueryTarget, RatingsPersistence};

#[derive(Debug, Default)]
pub(crate) struct StoreState {
    order: Vec<String>,
    values: HashMap<String, Option<f64>>,
    version: Version,
}

impl StoreState {
    pub(crate) fn set(&mut self, doc_id: &str, value: Option<f64>) {
        match self.values.get_mut(doc_id) {
            Some(slot) => *slot = value,
            None => {
                self.order.push(doc_id.to_string());
                self.values.insert(doc_id.to_string(), value);
            }
        }
    }

    fn get(&self, doc_id: &str) -> Option<f64> {
        self.values.get(doc_id).copied().flatten()
    }
}

pub(crate) struct StoreInner<P> {
    pub(crate) target: QueryTarget,
    pub(crate) persistence: P,
    pub(crate) state: RwLock<StoreState>,
}

/// Shared handle to one query's ratings cache.
///
/// Cloning is cheap and every clone (and every [`RateableDoc`]) sees the same cache. Callers
/// serialize mutations per store; concurrent calls are allowed but resolve last-writer-wins.
pub struct RatingsStore<P: RatingsPersistence> {
    pub(crate) inner: Arc<StoreInner<P>>,
}

impl<P: RatingsPersistence> RatingsStore<P> {
    /// Creates a store for `case_id`/`query_id`, seeded with `initial` ratings in iteration order.
    ///
    /// Text ratings are coerced to numbers; seeds that are not numbers are kept as unrated.
    pub fn new<I, K, V>(case_id: u64, query_id: u64, initial: I, persistence: P) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<RawRating>,
    {
        let mut state = StoreState::default();
        for (doc_id, raw) in initial {
            let doc_id = doc_id.into();
            let raw = raw.into();
            let value = raw.coerce();
            if value.is_none() {
                warn!(doc_id = %doc_id, value = %raw, "Seed rating is not numeric, treating as unrated");
            }
            state.set(&doc_id, value);
        }

        Self {
            inner: Arc::new(StoreInner {
                target: QueryTarget::new(case_id, query_id),
                persistence,
                state: RwLock::new(state),
            }),
        }
    }

    pub fn case_id(&self) -> u64 {
        self.inner.target.case_id
    }

    pub fn query_id(&self) -> u64 {
        self.inner.target.query_id
    }

    pub fn target(&self) -> &QueryTarget {
        &self.inner.target
    }

    /// Returns the persistence backend.
    pub fn persistence(&self) -> &P {
        &self.inner.persistence
    }

    /// Current version marker. Read-only operations never change it.
    pub fn version(&self) -> Version {
        self.inner.state.read().version
    }

    /// Returns the numeric rating of `doc_id`, or `None` if unrated or unknown.
    pub fn get_rating(&self, doc_id: &str) -> Option<f64> {
        self.inner.state.read().get(doc_id)
    }

    /// Returns `true` if `doc_id` has a rating.
    pub fn has_rating(&self, doc_id: &str) -> bool {
        self.get_rating(doc_id).is_some()
    }

    /// Returns `true` if at least one document in the store has a rating.
    pub fn has_any_rating(&self) -> bool {
        self.inner
            .state
            .read()
            .values
            .values()
            .any(|v| v.is_some())
    }

    /// Number of documents known to the store (rated or not).
    pub fn len(&self) -> usize {
        self.inner.state.read().order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn rated_count(&self) -> usize {
        self.inner
            .state
            .read()
            .values
            .values()
            .filter(|v| v.is_some())
            .count()
    }

    /// Copies the current ratings in insertion order.
    pub fn snapshot(&self) -> RatingsSnapshot {
        let query_id = self.query_id();
        let state = self.inner.state.read();
        let snapshot = state
            .order
            .iter()
            .map(|doc_id| Rating {
                query_id,
                doc_id: doc_id.clone(),
                value: state.get(doc_id),
            })
            .collect();
        snapshot
    }

    /// Returns up to `n` best-rated documents (see [`crate::ratings::ranking::best_docs`]).
    pub fn best_docs(&self, n: usize) -> Vec<RankedDoc> {
        self.snapshot().best_docs(n)
    }

    /// Rates one document. Commits and bumps the version only if the upsert succeeds.
    ///
    /// The empty id has no path segment and goes through the bulk endpoint as a single id.
    #[instrument(skip(self, value), fields(query = %self.inner.target))]
    pub async fn rate_document(
        &self,
        doc_id: &str,
        value: impl Into<RawRating>,
    ) -> RatingsResult<Version> {
        let raw = value.into();
        let rating = raw.coerce().ok_or_else(|| RatingsError::InvalidRating {
            doc_id: doc_id.to_string(),
            value: raw.to_string(),
        })?;

        let persistence = &self.inner.persistence;
        match path_segment_for(doc_id) {
            Some(encoded) => {
                persistence
                    .upsert_rating(&self.inner.target, &encoded, rating)
                    .await?
            }
            None => {
                persistence
                    .bulk_upsert_ratings(&self.inner.target, &[doc_id.to_string()], rating)
                    .await?
            }
        }

        let version = self.commit(|state| state.set(doc_id, Some(rating)));
        debug!(rating, version = %version, "Rating committed");
        Ok(version)
    }

    /// Clears the rating of one document. Commits and bumps the version only if the delete
    /// succeeds.
    #[instrument(skip(self), fields(query = %self.inner.target))]
    pub async fn reset_rating(&self, doc_id: &str) -> RatingsResult<Version> {
        let persistence = &self.inner.persistence;
        match path_segment_for(doc_id) {
            Some(encoded) => persistence.delete_rating(&self.inner.target, &encoded).await?,
            None => {
                persistence
                    .bulk_delete_ratings(&self.inner.target, &[doc_id.to_string()])
                    .await?
            }
        }

        let version = self.commit(|state| state.set(doc_id, None));
        debug!(version = %version, "Rating reset committed");
        Ok(version)
    }

    /// Wraps `doc` with rating operations bound to this store.
    pub fn create_rateable_doc<D: Identified>(&self, doc: D) -> RateableDoc<D, P> {
        RateableDoc::new(doc, self.clone())
    }

    /// Applies `mutate` and bumps the version under one write lock.
    pub(crate) fn commit<F>(&self, mutate: F) -> Version
    where
        F: FnOnce(&mut StoreState),
    {
        let mut state = self.inner.state.write();
        mutate(&mut state);
        state.version = state.version.next();
        state.version
    }
}

impl<P: RatingsPersistence> Clone for RatingsStore<P> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<P: RatingsPersistence> std::fmt::Debug for RatingsStore<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.state.read();
        f.debug_struct("RatingsStore")
            .field("target", &self.inner.target)
            .field("documents", &state.order.len())
            .field("version", &state.version)
            .finish()
    }
}
