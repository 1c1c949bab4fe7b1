use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::error::GatewayError;
use super::state::AppState;
use crate::codec::decode_from_transport;
use crate::constants::{IMPORT_SUCCESS_MESSAGE, LTR_CONTENT_TYPE};
use crate::exchange::{
    CaseSnapshot, ExportFormat, ImportRequest, export_json, export_ltr, export_rre, import_ratings,
};
use crate::persistence::{BulkDeleteBody, BulkRatingBody, RatingBody};

#[derive(Debug, Default, Deserialize)]
pub struct CreateCaseBody {
    #[serde(default)]
    pub index_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateQueryBody {
    pub query_text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateQueryResponse {
    pub query_id: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BulkResponse {
    pub count: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ExportParams {
    pub file_format: Option<String>,
    pub format: Option<String>,
}

fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, GatewayError> {
    body.map(|Json(value)| value)
        .map_err(|rejection| GatewayError::InvalidRequest(rejection.body_text()))
}

#[instrument(skip(state, body))]
pub async fn create_case_handler(
    State(state): State<AppState>,
    Path(case_id): Path<u64>,
    body: Result<Json<CreateCaseBody>, JsonRejection>,
) -> Result<Json<CaseSnapshot>, GatewayError> {
    let body = json_body(body)?;
    let case = state.repository.create_case(case_id, body.index_name).await?;
    Ok(Json(case))
}

#[instrument(skip(state))]
pub async fn get_case_handler(
    State(state): State<AppState>,
    Path(case_id): Path<u64>,
) -> Result<Json<CaseSnapshot>, GatewayError> {
    Ok(Json(state.repository.case_snapshot(case_id).await?))
}

#[instrument(skip(state, body))]
pub async fn create_query_handler(
    State(state): State<AppState>,
    Path(case_id): Path<u64>,
    body: Result<Json<CreateQueryBody>, JsonRejection>,
) -> Result<Json<CreateQueryResponse>, GatewayError> {
    let body = json_body(body)?;
    let query_id = state.repository.add_query(case_id, &body.query_text).await?;
    Ok(Json(CreateQueryResponse { query_id }))
}

/// `PUT .../ratings/{doc_id}`. The segment arrives transport-encoded.
#[instrument(skip(state, body))]
pub async fn upsert_rating_handler(
    State(state): State<AppState>,
    Path((case_id, query_id, doc_segment)): Path<(u64, u64, String)>,
    body: Result<Json<RatingBody>, JsonRejection>,
) -> Result<Response, GatewayError> {
    let body = json_body(body)?;
    let doc_id = decode_from_transport(&doc_segment);
    debug!(decoded = %doc_id, "Upserting rating");

    let record = state
        .repository
        .upsert_rating(case_id, query_id, &doc_id, body.rating)
        .await?;
    Ok((StatusCode::OK, Json(record)).into_response())
}

#[instrument(skip(state))]
pub async fn delete_rating_handler(
    State(state): State<AppState>,
    Path((case_id, query_id, doc_segment)): Path<(u64, u64, String)>,
) -> Result<StatusCode, GatewayError> {
    let doc_id = decode_from_transport(&doc_segment);
    let existed = state
        .repository
        .delete_rating(case_id, query_id, &doc_id)
        .await?;
    debug!(decoded = %doc_id, existed, "Rating deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Bulk routes carry raw ids in the body; no decoding applies.
#[instrument(skip(state, body))]
pub async fn bulk_upsert_handler(
    State(state): State<AppState>,
    Path((case_id, query_id)): Path<(u64, u64)>,
    body: Result<Json<BulkRatingBody>, JsonRejection>,
) -> Result<Json<BulkResponse>, GatewayError> {
    let body = json_body(body)?;
    let count = state
        .repository
        .bulk_upsert_ratings(case_id, query_id, &body.doc_ids, body.rating)
        .await?;
    Ok(Json(BulkResponse { count }))
}

#[instrument(skip(state, body))]
pub async fn bulk_delete_handler(
    State(state): State<AppState>,
    Path((case_id, query_id)): Path<(u64, u64)>,
    body: Result<Json<BulkDeleteBody>, JsonRejection>,
) -> Result<StatusCode, GatewayError> {
    let body = json_body(body)?;
    state
        .repository
        .bulk_delete_ratings(case_id, query_id, &body.doc_ids)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state, body))]
pub async fn import_ratings_handler(
    State(state): State<AppState>,
    Path(case_id): Path<u64>,
    body: Result<Json<ImportRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, GatewayError> {
    let request = json_body(body)?;
    import_ratings(state.repository.as_ref(), case_id, &request).await?;
    Ok(Json(MessageResponse {
        message: IMPORT_SUCCESS_MESSAGE.to_string(),
    }))
}

#[instrument(skip(state))]
pub async fn export_ratings_handler(
    State(state): State<AppState>,
    Path(case_id): Path<u64>,
    Query(params): Query<ExportParams>,
) -> Result<Response, GatewayError> {
    let format =
        ExportFormat::from_params(params.file_format.as_deref(), params.format.as_deref())?;
    let case = state.repository.case_snapshot(case_id).await?;

    let response = match format {
        ExportFormat::Json => Json(export_json(&case)).into_response(),
        ExportFormat::Rre => Json(export_rre(
            &case,
            &state.rre_id_field,
            &state.default_index,
        ))
        .into_response(),
        ExportFormat::Ltr => {
            ([(header::CONTENT_TYPE, LTR_CONTENT_TYPE)], export_ltr(&case)).into_response()
        }
    };
    Ok(response)
}
