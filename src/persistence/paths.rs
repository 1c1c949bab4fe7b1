//! Request paths of the persistence contract, relative to the API base URL.

use super::model::QueryTarget;

/// `/cases/{case_id}/queries/{query_id}/ratings/{encoded_doc_id}`
///
/// `encoded_doc_id` must already be the output of
/// [`encode_for_transport`](crate::codec::encode_for_transport).
pub fn rating_path(target: &QueryTarget, encoded_doc_id: &str) -> String {
    format!(
        "/cases/{}/queries/{}/ratings/{}",
        target.case_id, target.query_id, encoded_doc_id
    )
}

/// `/cases/{case_id}/queries/{query_id}/bulk/ratings`
pub fn bulk_ratings_path(target: &QueryTarget) -> String {
    format!(
        "/cases/{}/queries/{}/bulk/ratings",
        target.case_id, target.query_id
    )
}

/// `/cases/{case_id}/queries/{query_id}/bulk/ratings/delete`
pub fn bulk_delete_path(target: &QueryTarget) -> String {
    format!("{}/delete", bulk_ratings_path(target))
}
