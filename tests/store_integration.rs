//! Ratings store behavior against the recording persistence mock.

use std::time::Duration;

use judgment::persistence::{MockPersistence, RequestMethod};
use judgment::ratings::{Identified, RatingsSnapshot, RatingsStore};

struct Product {
    sku: String,
    name: String,
}

impl Identified for Product {
    fn doc_id(&self) -> &str {
        &self.sku
    }
}

#[tokio::test]
async fn test_rating_session_lifecycle() {
    let mock = MockPersistence::new();
    let store = RatingsStore::new(7, 3, [("sku-1", "4"), ("sku-2", "2")], mock.clone());

    let product = store.create_rateable_doc(Product {
        sku: "sku-3".to_string(),
        name: "Trail boots".to_string(),
    });
    assert_eq!(product.name, "Trail boots");
    assert!(!product.has_rating());

    product.rate(5).await.unwrap();
    store
        .rate_bulk_documents(&["sku-1", "sku-2"], 1)
        .await
        .unwrap();

    let best = store.best_docs(2);
    assert_eq!(best[0].id, "sku-3");
    assert_eq!(best[1].id, "sku-1");

    let methods: Vec<_> = mock.requests().iter().map(|r| r.method).collect();
    assert_eq!(methods, [RequestMethod::Put, RequestMethod::Put]);
    assert_eq!(
        mock.requests()[0].path,
        "/cases/7/queries/3/ratings/sku-3"
    );
}

#[tokio::test]
async fn test_clones_share_one_cache() {
    let mock = MockPersistence::new();
    let store = RatingsStore::new(1, 1, Vec::<(String, i32)>::new(), mock);
    let other = store.clone();

    other.rate_document("doc", 3).await.unwrap();

    assert_eq!(store.get_rating("doc"), Some(3.0));
    assert_eq!(store.version(), other.version());
}

#[tokio::test]
async fn test_failure_then_recovery() {
    let mock = MockPersistence::new();
    let store = RatingsStore::new(1, 1, [("doc", 1)], mock.clone());

    mock.set_failing(true);
    assert!(store.rate_document("doc", 9).await.is_err());
    assert_eq!(store.get_rating("doc"), Some(1.0));

    mock.set_failing(false);
    store.rate_document("doc", 9).await.unwrap();
    assert_eq!(store.get_rating("doc"), Some(9.0));
    assert_eq!(mock.request_count(), 2);
}

#[tokio::test]
async fn test_slow_reset_commits_after_fast_rate() {
    let mock = MockPersistence::new();
    let store = RatingsStore::new(1, 1, [("doc", 1)], mock.clone());
    mock.queue_latency(Duration::from_millis(40));

    let (reset, rate) = tokio::join!(store.reset_rating("doc"), store.rate_document("doc", 7));

    assert!(rate.unwrap() < reset.unwrap());
    assert!(!store.has_rating("doc"));
}

#[test]
fn test_best_docs_across_queries() {
    let first = RatingsStore::new(1, 10, [("a", 2), ("b", 8)], MockPersistence::new());
    let second = RatingsStore::new(1, 11, [("c", 8), ("d", 5)], MockPersistence::new());

    let mut merged = RatingsSnapshot::new();
    merged.merge(first.snapshot());
    merged.merge(second.snapshot());

    let best: Vec<_> = merged
        .best_docs(3)
        .into_iter()
        .map(|d| (d.query_id, d.id))
        .collect();
    assert_eq!(
        best,
        [
            (10, "b".to_string()),
            (11, "c".to_string()),
            (11, "d".to_string())
        ]
    );
}
