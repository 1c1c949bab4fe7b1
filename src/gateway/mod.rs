//! HTTP gateway (Axum) serving the ratings API, import and export.
//!
//! Routes mirror the paths [`HttpPersistence`](crate::persistence::HttpPersistence) calls, mounted
//! under [`API_PREFIX`](crate::constants::API_PREFIX). Singular rating routes decode the
//! document id segment with [`decode_from_transport`](crate::codec::decode_from_transport).

pub mod error;
pub mod handler;
pub mod state;


use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use tower_http::trace::TraceLayer;

pub use error::GatewayError;
pub use handler::{
    bulk_delete_handler, bulk_upsert_handler, create_case_handler, create_query_handler,
    delete_rating_handler, export_ratings_handler, get_case_handler, import_ratings_handler,
    upsert_rating_handler,
};
pub use state::AppState;

use crate::constants::API_PREFIX;

/// Routes of the ratings API, relative to [`API_PREFIX`].
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/cases/{case_id}",
            put(create_case_handler).get(get_case_handler),
        )
        .route("/cases/{case_id}/queries", post(create_query_handler))
        .route(
            "/cases/{case_id}/queries/{query_id}/ratings/{doc_id}",
            put(upsert_rating_handler).delete(delete_rating_handler),
        )
        .route(
            "/cases/{case_id}/queries/{query_id}/bulk/ratings",
            put(bulk_upsert_handler),
        )
        .route(
            "/cases/{case_id}/queries/{query_id}/bulk/ratings/delete",
            post(bulk_delete_handler),
        )
        .route("/cases/{case_id}/import/ratings", post(import_ratings_handler))
        .route("/cases/{case_id}/export/ratings", get(export_ratings_handler))
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(health_handler))
        .nest(API_PREFIX, api_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(serde::Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[tracing::instrument]
pub async fn health_handler() -> Response {
    (StatusCode::OK, Json(HealthResponse { status: "ok" })).into_response()
}
