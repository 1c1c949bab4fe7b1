use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::warn;

use crate::exchange::ExchangeError;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Exchange(#[from] ExchangeError),
}

#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub message: String,
    pub code: u16,
}

impl GatewayError {
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            GatewayError::Exchange(
                ExchangeError::CaseNotFound { .. } | ExchangeError::QueryNotFound { .. },
            ) => StatusCode::NOT_FOUND,
            GatewayError::Exchange(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();
        warn!(status = status.as_u16(), error = %message, "Request failed");

        let body = Json(ErrorResponse {
            message,
            code: status.as_u16(),
        });

        (status, body).into_response()
    }
}
