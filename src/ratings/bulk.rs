//! Multi-document mutations in a single round trip.
//!
//! Same commit rules as the single-document operations: nothing changes unless the round trip
//! succeeds, and then every listed document changes under one version bump.

use tracing::{debug, instrument};

use super::error::{RatingsError, RatingsResult};
use super::store::RatingsStore;
use super::types::{RawRating, Version};
use crate::persistence::RatingsPersistence;

impl<P: RatingsPersistence> RatingsStore<P> {
    /// Rates every document in `doc_ids` with the same value.
    ///
    /// An empty list is a no-op (no request, version unchanged).
    #[instrument(skip(self, doc_ids, value), fields(query = %self.inner.target, count = doc_ids.len()))]
    pub async fn rate_bulk_documents<S>(
        &self,
        doc_ids: &[S],
        value: impl Into<RawRating>,
    ) -> RatingsResult<Version>
    where
        S: AsRef<str> + Sync,
    {
        let raw = value.into();
        let ids = owned_ids(doc_ids);
        let rating = raw.coerce().ok_or_else(|| RatingsError::InvalidRating {
            doc_id: ids.join(","),
            value: raw.to_string(),
        })?;

        if ids.is_empty() {
            return Ok(self.version());
        }

        self.inner
            .persistence
            .bulk_upsert_ratings(&self.inner.target, &ids, rating)
            .await?;

        let version = self.commit(|state| {
            for id in &ids {
                state.set(id, Some(rating));
            }
        });
        debug!(rating, version = %version, "Bulk rating committed");
        Ok(version)
    }

    /// Clears the ratings of every document in `doc_ids`.
    ///
    /// An empty list is a no-op (no request, version unchanged).
    #[instrument(skip(self, doc_ids), fields(query = %self.inner.target, count = doc_ids.len()))]
    pub async fn reset_bulk_ratings<S>(&self, doc_ids: &[S]) -> RatingsResult<Version>
    where
        S: AsRef<str> + Sync,
    {
        let ids = owned_ids(doc_ids);
        if ids.is_empty() {
            return Ok(self.version());
        }

        self.inner
            .persistence
            .bulk_delete_ratings(&self.inner.target, &ids)
            .await?;

        let version = self.commit(|state| {
            for id in &ids {
                state.set(id, None);
            }
        });
        debug!(version = %version, "Bulk reset committed");
        Ok(version)
    }
}

fn owned_ids<S: AsRef<str>>(doc_ids: &[S]) -> Vec<String> {
    doc_ids.iter().map(|id| id.as_ref().to_string()).collect()
}
