use std::time::Duration;

use reqwest::Client as HttpClient;
use serde::Serialize;
use tracing::{debug, instrument};

use super::error::{PersistenceError, PersistenceResult};
use super::model::{BulkDeleteBody, BulkRatingBody, QueryTarget, RatingBody, RequestMethod};
use super::paths::{bulk_delete_path, bulk_ratings_path, rating_path};
use crate::config::Config;

/// Durable side of a ratings store.
///
/// Every call is one round trip. Implementations must not report success unless the change
/// is durable; the store commits its in-memory state only after `Ok(())`.
pub trait RatingsPersistence: Send + Sync {
    /// Upserts one rating, keyed by the transport-encoded document id.
    fn upsert_rating(
        &self,
        target: &QueryTarget,
        encoded_doc_id: &str,
        rating: f64,
    ) -> impl std::future::Future<Output = PersistenceResult<()>> + Send;

    /// Deletes one rating, keyed by the transport-encoded document id.
    fn delete_rating(
        &self,
        target: &QueryTarget,
        encoded_doc_id: &str,
    ) -> impl std::future::Future<Output = PersistenceResult<()>> + Send;

    /// Applies `rating` to every raw document id in one request.
    fn bulk_upsert_ratings(
        &self,
        target: &QueryTarget,
        doc_ids: &[String],
        rating: f64,
    ) -> impl std::future::Future<Output = PersistenceResult<()>> + Send;

    /// Deletes the ratings of every raw document id in one request.
    fn bulk_delete_ratings(
        &self,
        target: &QueryTarget,
        doc_ids: &[String],
    ) -> impl std::future::Future<Output = PersistenceResult<()>> + Send;
}

#[derive(Clone)]
/// HTTP implementation of [`RatingsPersistence`] against the ratings API.
pub struct HttpPersistence {
    client: HttpClient,
    base_url: String,
}

impl HttpPersistence {
    /// Creates a client for `base_url` (e.g. `http://127.0.0.1:8080/api`).
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> PersistenceResult<Self> {
        let client = HttpClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PersistenceError::ClientBuild {
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Creates a client from `JUDGMENT_API_BASE_URL` / `JUDGMENT_REQUEST_TIMEOUT_SECS` settings.
    pub fn from_config(config: &Config) -> PersistenceResult<Self> {
        Self::new(config.api_base_url.clone(), config.request_timeout)
    }

    /// Returns the configured base URL (without trailing slash).
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T: Serialize + ?Sized>(
        &self,
        method: RequestMethod,
        path: String,
        body: Option<&T>,
    ) -> PersistenceResult<()> {
        let url = self.url(&path);
        let builder = match method {
            RequestMethod::Put => self.client.put(&url),
            RequestMethod::Post => self.client.post(&url),
            RequestMethod::Delete => self.client.delete(&url),
        };
        let builder = match body {
            Some(body) => builder.json(body),
            None => builder,
        };

        let resp = builder
            .send()
            .await
            .map_err(|e| PersistenceError::RequestFailed {
                method: method.as_str(),
                url: url.clone(),
                message: e.to_string(),
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(PersistenceError::UnexpectedStatus {
                method: method.as_str(),
                url,
                status: status.as_u16(),
                body,
            });
        }

        debug!(method = %method, url = %url, status = status.as_u16(), "Persistence round trip ok");
        Ok(())
    }
}

impl std::fmt::Debug for HttpPersistence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpPersistence")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl RatingsPersistence for HttpPersistence {
    #[instrument(skip(self, target), fields(query = %target))]
    async fn upsert_rating(
        &self,
        target: &QueryTarget,
        encoded_doc_id: &str,
        rating: f64,
    ) -> PersistenceResult<()> {
        self.send(
            RequestMethod::Put,
            rating_path(target, encoded_doc_id),
            Some(&RatingBody { rating }),
        )
        .await
    }

    #[instrument(skip(self, target), fields(query = %target))]
    async fn delete_rating(&self, target: &QueryTarget, encoded_doc_id: &str) -> PersistenceResult<()> {
        self.send::<()>(RequestMethod::Delete, rating_path(target, encoded_doc_id), None)
            .await
    }

    #[instrument(skip(self, target, doc_ids), fields(query = %target, count = doc_ids.len()))]
    async fn bulk_upsert_ratings(
        &self,
        target: &QueryTarget,
        doc_ids: &[String],
        rating: f64,
    ) -> PersistenceResult<()> {
        let body = BulkRatingBody {
            doc_ids: doc_ids.to_vec(),
            rating,
        };
        self.send(RequestMethod::Put, bulk_ratings_path(target), Some(&body))
            .await
    }

    #[instrument(skip(self, target, doc_ids), fields(query = %target, count = doc_ids.len()))]
    async fn bulk_delete_ratings(
        &self,
        target: &QueryTarget,
        doc_ids: &[String],
    ) -> PersistenceResult<()> {
        let body = BulkDeleteBody {
            doc_ids: doc_ids.to_vec(),
        };
        self.send(RequestMethod::Post, bulk_delete_path(target), Some(&body))
            .await
    }
}
