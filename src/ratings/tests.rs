use std::time::Duration;

use serde_json::json;

use super::*;
use crate::persistence::{MockPersistence, RequestMethod};

type MockStore = RatingsStore<MockPersistence>;

fn store_with(initial: &[(&str, i32)]) -> (MockStore, MockPersistence) {
    let mock = MockPersistence::new();
    let store = RatingsStore::new(0, 1, initial.iter().copied(), mock.clone());
    (store, mock)
}

fn empty_store() -> (MockStore, MockPersistence) {
    store_with(&[])
}

#[derive(Debug, Clone, PartialEq)]
struct SearchDoc {
    id: String,
    title: String,
}

impl SearchDoc {
    fn new(id: &str, title: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
        }
    }

    fn shout(&self) -> String {
        self.title.to_uppercase()
    }
}

impl Identified for SearchDoc {
    fn doc_id(&self) -> &str {
        &self.id
    }
}

#[test]
fn test_seed_ratings_are_coerced_to_numbers() {
    let store = RatingsStore::new(0, 1, [("doc1", "10")], MockPersistence::new());
    assert_eq!(store.get_rating("doc1"), Some(10.0));
}

#[test]
fn test_non_numeric_seed_is_unrated() {
    let store = RatingsStore::new(0, 1, [("doc1", "great")], MockPersistence::new());
    assert_eq!(store.get_rating("doc1"), None);
    assert!(!store.has_any_rating());
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn test_rate_document() {
    let (store, mock) = empty_store();

    store.rate_document("doc1", 10).await.unwrap();

    assert_eq!(store.get_rating("doc1"), Some(10.0));
    let request = mock.last_request().unwrap();
    assert_eq!(request.method, RequestMethod::Put);
    assert_eq!(request.path, "/cases/0/queries/1/ratings/doc1");
    assert_eq!(request.body, Some(json!({"rating": 10.0})));
}

#[tokio::test]
async fn test_rate_with_text_reads_back_as_number() {
    let (store, _mock) = empty_store();

    store.rate_document("doc1", "10").await.unwrap();

    assert_eq!(store.get_rating("doc1"), Some(10.0));
}

#[tokio::test]
async fn test_rate_rejects_non_numeric_text_without_round_trip() {
    let (store, mock) = empty_store();
    let before = store.version();

    let err = store.rate_document("doc1", "excellent").await.unwrap_err();

    assert!(matches!(err, RatingsError::InvalidRating { .. }));
    assert_eq!(mock.request_count(), 0);
    assert_eq!(store.version(), before);
}

#[tokio::test]
async fn test_rate_encodes_url_ids() {
    let (store, mock) = empty_store();

    store.rate_document("file://foo/bar", 10).await.unwrap();
    assert_eq!(
        mock.last_request().unwrap().path,
        "/cases/0/queries/1/ratings/ZmlsZTovL2Zvby9iYXI%3D"
    );
    assert_eq!(store.get_rating("file://foo/bar"), Some(10.0));

    store
        .rate_document("http://www.example.com/doc/1", 10)
        .await
        .unwrap();
    assert_eq!(
        mock.last_request().unwrap().path,
        "/cases/0/queries/1/ratings/aHR0cDovL3d3dy5leGFtcGxlLmNvbS9kb2MvMQ%3D%3D"
    );

    let slug = "aspace-https-archives-yale-edu-repositories-5-archival_objects-2530795";
    store.rate_document(slug, 10).await.unwrap();
    assert_eq!(
        mock.last_request().unwrap().path,
        format!("/cases/0/queries/1/ratings/{}", slug)
    );
    assert_eq!(store.get_rating(slug), Some(10.0));

    store
        .rate_document("website:http://www.google.com", 10)
        .await
        .unwrap();
    assert_eq!(
        mock.last_request().unwrap().path,
        "/cases/0/queries/1/ratings/d2Vic2l0ZTpodHRwOi8vd3d3Lmdvb2dsZS5jb20%3D"
    );
}

#[tokio::test]
async fn test_rate_encodes_ids_with_period() {
    let (store, mock) = empty_store();

    store.rate_document("mydoc.pdf", 10).await.unwrap();

    assert_eq!(
        mock.last_request().unwrap().path,
        "/cases/0/queries/1/ratings/bXlkb2MucGRm"
    );
    assert_eq!(store.get_rating("mydoc.pdf"), Some(10.0));
}

#[tokio::test]
async fn test_reset_encodes_url_ids() {
    let (store, mock) = empty_store();

    store.reset_rating("file://foo/bar").await.unwrap();

    let request = mock.last_request().unwrap();
    assert_eq!(request.method, RequestMethod::Delete);
    assert_eq!(
        request.path,
        "/cases/0/queries/1/ratings/ZmlsZTovL2Zvby9iYXI%3D"
    );
    assert!(!store.has_rating("file://foo/bar"));
}

#[tokio::test]
async fn test_empty_id_travels_in_request_body() {
    let (store, mock) = empty_store();

    store.rate_document("", 3).await.unwrap();
    let request = mock.last_request().unwrap();
    assert_eq!(request.method, RequestMethod::Put);
    assert_eq!(request.path, "/cases/0/queries/1/bulk/ratings");
    assert_eq!(request.body, Some(json!({"doc_ids": [""], "rating": 3.0})));
    assert_eq!(store.get_rating(""), Some(3.0));

    store.reset_rating("").await.unwrap();
    let request = mock.last_request().unwrap();
    assert_eq!(request.method, RequestMethod::Post);
    assert_eq!(request.path, "/cases/0/queries/1/bulk/ratings/delete");
    assert_eq!(request.body, Some(json!({"doc_ids": [""]})));
    assert!(!store.has_rating(""));
}

#[tokio::test]
async fn test_alter_existing_rating() {
    let (store, _mock) = store_with(&[("doc1", 10)]);

    store.rate_document("doc1", 5).await.unwrap();

    assert_eq!(store.get_rating("doc1"), Some(5.0));
}

#[tokio::test]
async fn test_reset_rating() {
    let (store, mock) = store_with(&[("doc1", 10)]);
    assert!(store.has_rating("doc1"));

    store.reset_rating("doc1").await.unwrap();

    assert_eq!(
        mock.last_request().unwrap().path,
        "/cases/0/queries/1/ratings/doc1"
    );
    assert!(!store.has_any_rating());
}

#[tokio::test]
async fn test_bulk_rate() {
    let (store, mock) = empty_store();

    store
        .rate_bulk_documents(&["doc1", "doc2"], 10)
        .await
        .unwrap();

    assert_eq!(store.get_rating("doc1"), Some(10.0));
    assert_eq!(store.get_rating("doc2"), Some(10.0));

    let requests = mock.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, RequestMethod::Put);
    assert_eq!(requests[0].path, "/cases/0/queries/1/bulk/ratings");
    assert_eq!(
        requests[0].body,
        Some(json!({"doc_ids": ["doc1", "doc2"], "rating": 10.0}))
    );
}

#[tokio::test]
async fn test_bulk_reset() {
    let (store, mock) = store_with(&[("doc1", 10), ("doc2", 10)]);
    assert!(store.has_rating("doc1"));

    store.reset_bulk_ratings(&["doc1", "doc2"]).await.unwrap();

    assert!(!store.has_any_rating());
    let request = mock.last_request().unwrap();
    assert_eq!(request.method, RequestMethod::Post);
    assert_eq!(request.path, "/cases/0/queries/1/bulk/ratings/delete");
}

#[tokio::test]
async fn test_bulk_rate_then_bulk_reset_leaves_nothing_rated() {
    let (store, _mock) = empty_store();

    store
        .rate_bulk_documents(&["doc1", "doc2"], 10)
        .await
        .unwrap();
    assert!(store.has_any_rating());

    store.reset_bulk_ratings(&["doc1", "doc2"]).await.unwrap();
    assert!(!store.has_any_rating());
}

#[tokio::test]
async fn test_bulk_ids_travel_raw() {
    let (store, mock) = empty_store();

    store
        .rate_bulk_documents(&["http://example.com/a.html"], 3)
        .await
        .unwrap();

    assert_eq!(
        mock.last_request().unwrap().body,
        Some(json!({"doc_ids": ["http://example.com/a.html"], "rating": 3.0}))
    );
}

#[tokio::test]
async fn test_empty_bulk_is_noop() {
    let (store, mock) = empty_store();
    let before = store.version();
    let none: [&str; 0] = [];

    store.rate_bulk_documents(&none, 10).await.unwrap();
    store.reset_bulk_ratings(&none).await.unwrap();

    assert_eq!(mock.request_count(), 0);
    assert_eq!(store.version(), before);
}

#[tokio::test]
async fn test_version_increments_on_every_mutation() {
    let (store, _mock) = store_with(&[("doc1", 10)]);

    let v0 = store.version();
    store.reset_rating("doc1").await.unwrap();
    let v1 = store.version();
    store.rate_document("doc1", "5").await.unwrap();
    let v2 = store.version();
    store
        .rate_bulk_documents(&["doc1", "doc2"], 3)
        .await
        .unwrap();
    let v3 = store.version();
    store.reset_bulk_ratings(&["doc1", "doc2"]).await.unwrap();
    let v4 = store.version();

    assert!(v0 < v1 && v1 < v2 && v2 < v3 && v3 < v4);
}

#[tokio::test]
async fn test_bulk_bumps_version_once() {
    let (store, _mock) = empty_store();
    let before = store.version();

    let after = store
        .rate_bulk_documents(&["a", "b", "c", "d"], 1)
        .await
        .unwrap();

    assert_eq!(after, before.next());
    assert_eq!(store.version(), after);
}

#[tokio::test]
async fn test_reads_do_not_change_version() {
    let (store, _mock) = store_with(&[("doc1", 10), ("doc2", 3)]);
    let before = store.version();

    let _ = store.get_rating("doc1");
    let _ = store.has_rating("doc2");
    let _ = store.has_any_rating();
    let _ = store.best_docs(5);
    let _ = store.snapshot();

    assert_eq!(store.version(), before);
}

#[tokio::test]
async fn test_persistence_failure_commits_nothing() {
    let (store, mock) = store_with(&[("doc1", 10)]);
    mock.set_failing(true);
    let before = store.version();

    let err = store.rate_document("doc1", 1).await.unwrap_err();
    assert!(matches!(err, RatingsError::Persistence(_)));
    assert_eq!(store.get_rating("doc1"), Some(10.0));

    assert!(store.reset_rating("doc1").await.is_err());
    assert!(store.has_rating("doc1"));

    assert!(
        store
            .rate_bulk_documents(&["doc1", "doc2"], 2)
            .await
            .is_err()
    );
    assert_eq!(store.get_rating("doc2"), None);

    assert!(store.reset_bulk_ratings(&["doc1"]).await.is_err());
    assert!(store.has_rating("doc1"));

    assert_eq!(store.version(), before);
}

#[tokio::test]
async fn test_concurrent_mutations_commit_in_resolution_order() {
    let (store, mock) = empty_store();
    mock.queue_latency(Duration::from_millis(50));
    mock.queue_latency(Duration::from_millis(0));

    let slow = store.rate_document("doc1", 1);
    let fast = store.rate_document("doc1", 2);
    let (slow, fast) = tokio::join!(slow, fast);

    let slow = slow.unwrap();
    let fast = fast.unwrap();
    assert!(fast < slow);
    assert_eq!(store.get_rating("doc1"), Some(1.0));
}

#[test]
fn test_best_docs() {
    let (store, _mock) = store_with(&[("doc2", 9), ("doc1", 10), ("doc3", 8)]);

    let best = store.best_docs(2);
    assert_eq!(best.len(), 2);
    assert_eq!(best[0].id, "doc1");
    assert_eq!(best[1].id, "doc2");

    let best = store.best_docs(10);
    let ids: Vec<_> = best.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, ["doc1", "doc2", "doc3"]);
}

#[tokio::test]
async fn test_best_docs_ties_keep_insertion_order_and_skip_unrated() {
    let (store, _mock) = store_with(&[("b", 5), ("a", 5), ("c", 7), ("d", 5)]);
    store.reset_rating("c").await.unwrap();

    let ids: Vec<_> = store.best_docs(10).into_iter().map(|d| d.id).collect();
    assert_eq!(ids, ["b", "a", "d"]);

    assert!(store.best_docs(0).is_empty());
}

#[test]
fn test_merged_snapshots_rank_with_same_tie_break() {
    let (first, _m1) = store_with(&[("x", 3), ("y", 4)]);
    let second = RatingsStore::new(0, 2, [("z", 4), ("w", 1)], MockPersistence::new());

    let mut merged = first.snapshot();
    merged.merge(second.snapshot());

    let best = merged.best_docs(3);
    let ids: Vec<_> = best.iter().map(|d| (d.query_id, d.id.as_str())).collect();
    assert_eq!(ids, [(1, "y"), (2, "z"), (1, "x")]);
    assert_eq!(merged.len(), 4);
    assert_eq!(merged.rated_count(), 4);
}

#[test]
fn test_snapshot_merge_overrides_values_in_place() {
    let mut snapshot: RatingsSnapshot = [
        Rating {
            query_id: 1,
            doc_id: "a".into(),
            value: Some(1.0),
        },
        Rating {
            query_id: 1,
            doc_id: "b".into(),
            value: Some(2.0),
        },
    ]
    .into_iter()
    .collect();

    let update: RatingsSnapshot = [Rating {
        query_id: 1,
        doc_id: "a".into(),
        value: Some(9.0),
    }]
    .into_iter()
    .collect();
    snapshot.merge(update);

    let first = snapshot.iter().next().unwrap();
    assert_eq!(first.doc_id, "a");
    assert_eq!(first.value, Some(9.0));
    assert_eq!(snapshot.len(), 2);
}

#[test]
fn test_rateable_docs_keep_their_own_behavior() {
    let (store, _mock) = store_with(&[("doc1", 10)]);

    let first = store.create_rateable_doc(SearchDoc::new("doc1", "flarb"));
    let second = store.create_rateable_doc(SearchDoc::new("doc1", "flarb two"));

    assert_eq!(second.shout(), "FLARB TWO");
    assert_eq!(first.shout(), "FLARB");
    assert_eq!(first.title, "flarb");
    assert_eq!(first.get_rating(), Some(10.0));
    assert_eq!(second.get_rating(), Some(10.0));
}

#[test]
fn test_rateable_doc_mutation_does_not_leak_between_wrappers() {
    let (store, _mock) = empty_store();

    let mut first = store.create_rateable_doc(SearchDoc::new("doc1", "one"));
    let second = store.create_rateable_doc(SearchDoc::new("doc2", "two"));

    first.title = "changed".to_string();

    assert_eq!(first.title, "changed");
    assert_eq!(second.title, "two");
    assert_eq!(second.into_inner(), SearchDoc::new("doc2", "two"));
}

#[tokio::test]
async fn test_rateable_doc_rates_through_store() {
    let (store, mock) = store_with(&[("doc1", 10)]);
    let doc = store.create_rateable_doc(SearchDoc::new("doc2", "title"));

    doc.rate(5).await.unwrap();

    assert_eq!(
        mock.last_request().unwrap().path,
        "/cases/0/queries/1/ratings/doc2"
    );
    assert_eq!(doc.get_rating(), Some(5.0));
    assert_eq!(store.get_rating("doc2"), Some(5.0));
}

#[tokio::test]
async fn test_rateable_doc_reset() {
    let (store, mock) = store_with(&[("doc1", 10)]);
    let doc = store.create_rateable_doc("doc2".to_string());

    doc.reset_rating().await.unwrap();

    let request = mock.last_request().unwrap();
    assert_eq!(request.method, RequestMethod::Delete);
    assert_eq!(request.path, "/cases/0/queries/1/ratings/doc2");
}

#[test]
fn test_rateable_doc_has_no_rating_initially() {
    let (store, _mock) = store_with(&[("doc1", 10)]);
    let doc = store.create_rateable_doc("doc2");

    assert!(!doc.has_rating());
    assert_eq!(doc.get_rating(), None);
    assert_eq!(doc.id(), "doc2");
}

#[test]
fn test_raw_rating_coercion() {
    assert_eq!(RawRating::from("10").coerce(), Some(10.0));
    assert_eq!(RawRating::from(" 2.5 ").coerce(), Some(2.5));
    assert_eq!(RawRating::from(3).coerce(), Some(3.0));
    assert_eq!(RawRating::from("n/a").coerce(), None);
    assert_eq!(RawRating::from(f64::NAN).coerce(), None);
}

#[test]
fn test_raw_rating_deserializes_numbers_and_text() {
    let raw: RawRating = serde_json::from_value(json!(4)).unwrap();
    assert_eq!(raw.coerce(), Some(4.0));

    let raw: RawRating = serde_json::from_value(json!("4")).unwrap();
    assert_eq!(raw, RawRating::Text("4".to_string()));
}
