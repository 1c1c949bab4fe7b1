use std::time::Duration;

use super::*;

fn target() -> QueryTarget {
    QueryTarget::new(0, 1)
}

#[test]
fn test_paths() {
    let t = target();
    assert_eq!(rating_path(&t, "doc1"), "/cases/0/queries/1/ratings/doc1");
    assert_eq!(bulk_ratings_path(&t), "/cases/0/queries/1/bulk/ratings");
    assert_eq!(bulk_delete_path(&t), "/cases/0/queries/1/bulk/ratings/delete");
}

#[test]
fn test_rating_path_keeps_percent_escapes() {
    let t = QueryTarget::new(7, 42);
    assert_eq!(
        rating_path(&t, "ZmlsZTovL2Zvby9iYXI%3D"),
        "/cases/7/queries/42/ratings/ZmlsZTovL2Zvby9iYXI%3D"
    );
}

#[test]
fn test_http_persistence_trims_base_url() {
    let client = HttpPersistence::new("http://localhost:9999/api/", Duration::from_secs(1))
        .expect("client should build");
    assert_eq!(client.base_url(), "http://localhost:9999/api");
}

#[tokio::test]
async fn test_http_persistence_reports_connection_failure() {
    // Port 9 (discard) is not expected to run an HTTP server.
    let client = HttpPersistence::new("http://127.0.0.1:9/api", Duration::from_millis(500))
        .expect("client should build");

    let err = client
        .upsert_rating(&target(), "doc1", 3.0)
        .await
        .expect_err("no server is listening");

    assert!(matches!(
        err,
        PersistenceError::RequestFailed { method: "PUT", .. }
    ));
}

#[tokio::test]
async fn test_mock_records_bodies() {
    let mock = MockPersistence::new();
    let t = target();

    mock.upsert_rating(&t, "doc1", 10.0).await.unwrap();
    mock.bulk_upsert_ratings(&t, &["a".to_string(), "b".to_string()], 2.0)
        .await
        .unwrap();
    mock.bulk_delete_ratings(&t, &["a".to_string()]).await.unwrap();
    mock.delete_rating(&t, "doc1").await.unwrap();

    let requests = mock.requests();
    assert_eq!(requests.len(), 4);

    assert_eq!(requests[0].method, RequestMethod::Put);
    assert_eq!(requests[0].body, Some(serde_json::json!({"rating": 10.0})));

    assert_eq!(requests[1].path, "/cases/0/queries/1/bulk/ratings");
    assert_eq!(
        requests[1].body,
        Some(serde_json::json!({"doc_ids": ["a", "b"], "rating": 2.0}))
    );

    assert_eq!(requests[2].method, RequestMethod::Post);
    assert_eq!(requests[2].body, Some(serde_json::json!({"doc_ids": ["a"]})));

    assert_eq!(requests[3].method, RequestMethod::Delete);
    assert_eq!(requests[3].body, None);
}

#[tokio::test]
async fn test_mock_failure_mode() {
    let mock = MockPersistence::new();
    mock.set_failing(true);

    let err = mock
        .upsert_rating(&target(), "doc1", 1.0)
        .await
        .expect_err("mock is failing");
    assert!(matches!(
        err,
        PersistenceError::UnexpectedStatus { status: 500, .. }
    ));
    assert_eq!(mock.request_count(), 1);

    mock.set_failing(false);
    assert!(mock.delete_rating(&target(), "doc1").await.is_ok());
}

#[test]
fn test_request_method_display() {
    assert_eq!(RequestMethod::Put.to_string(), "PUT");
    assert_eq!(RequestMethod::Post.to_string(), "POST");
    assert_eq!(RequestMethod::Delete.to_string(), "DELETE");
}
