//! Recording in-process persistence for tests.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use parking_lot::Mutex;
use serde_json::Value;

use super::client::RatingsPersistence;
use super::error::{PersistenceError, PersistenceResult};
use super::model::{BulkDeleteBody, BulkRatingBody, QueryTarget, RatingBody, RequestMethod};
use super::paths::{bulk_delete_path, bulk_ratings_path, rating_path};

/// One request seen by [`MockPersistence`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: RequestMethod,
    pub path: String,
    pub body: Option<Value>,
}

#[derive(Default)]
struct MockState {
    requests: Mutex<Vec<RecordedRequest>>,
    latencies: Mutex<VecDeque<Duration>>,
    failing: AtomicBool,
}

/// Records every request and answers success unless told to fail.
///
/// Clones share the same recording, so a test can keep one handle while the store owns another.
#[derive(Default, Clone)]
pub struct MockPersistence {
    state: Arc<MockState>,
}

impl MockPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every following request fail (or succeed again with `false`).
    pub fn set_failing(&self, failing: bool) {
        self.state.failing.store(failing, Ordering::Release);
    }

    /// Delays the next not-yet-started request by `latency`. Queued delays apply in call order.
    pub fn queue_latency(&self, latency: Duration) {
        self.state.latencies.lock().push_back(latency);
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().clone()
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.state.requests.lock().last().cloned()
    }

    pub fn request_count(&self) -> usize {
        self.state.requests.lock().len()
    }

    pub fn clear(&self) {
        self.state.requests.lock().clear();
    }

    async fn record(
        &self,
        method: RequestMethod,
        path: String,
        body: Option<Value>,
    ) -> PersistenceResult<()> {
        let latency = self.state.latencies.lock().pop_front();
        self.state.requests.lock().push(RecordedRequest {
            method,
            path: path.clone(),
            body,
        });

        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }

        if self.state.failing.load(Ordering::Acquire) {
            return Err(PersistenceError::UnexpectedStatus {
                method: method.as_str(),
                url: path,
                status: 500,
                body: "mock failure".to_string(),
            });
        }

        Ok(())
    }
}

impl std::fmt::Debug for MockPersistence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockPersistence")
            .field("requests", &self.request_count())
            .field("failing", &self.state.failing.load(Ordering::Acquire))
            .finish()
    }
}

impl RatingsPersistence for MockPersistence {
    async fn upsert_rating(
        &self,
        target: &QueryTarget,
        encoded_doc_id: &str,
        rating: f64,
    ) -> PersistenceResult<()> {
        let body = serde_json::to_value(RatingBody { rating }).ok();
        self.record(RequestMethod::Put, rating_path(target, encoded_doc_id), body)
            .await
    }

    async fn delete_rating(&self, target: &QueryTarget, encoded_doc_id: &str) -> PersistenceResult<()> {
        self.record(RequestMethod::Delete, rating_path(target, encoded_doc_id), None)
            .await
    }

    async fn bulk_upsert_ratings(
        &self,
        target: &QueryTarget,
        doc_ids: &[String],
        rating: f64,
    ) -> PersistenceResult<()> {
        let body = serde_json::to_value(BulkRatingBody {
            doc_ids: doc_ids.to_vec(),
            rating,
        })
        .ok();
        self.record(RequestMethod::Put, bulk_ratings_path(target), body)
            .await
    }

    async fn bulk_delete_ratings(
        &self,
        target: &QueryTarget,
        doc_ids: &[String],
    ) -> PersistenceResult<()> {
        let body = serde_json::to_value(BulkDeleteBody {
            doc_ids: doc_ids.to_vec(),
        })
        .ok();
        self.record(RequestMethod::Post, bulk_delete_path(target), body)
            .await
    }
}
