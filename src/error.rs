use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use riskbar_engine::{ExtractError, PageFailure};
use serde_json::json;
use thiserror::Error;

use crate::models::TemplateError;
use crate::services::{DetectError, RasterError};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Unknown template: {0}")]
    UnknownTemplate(String),

    #[error("Upload too large: {size} bytes (max {max})")]
    PayloadTooLarge { size: usize, max: usize },

    #[error("Page {page}: {message}")]
    GeometryMismatch { page: usize, message: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<DetectError> for ApiError {
    fn from(e: DetectError) -> Self {
        match e {
            DetectError::UnknownTemplate(name) => ApiError::UnknownTemplate(name),
            DetectError::Raster {
                source: RasterError::TooLarge { size, max },
                ..
            } => ApiError::PayloadTooLarge { size, max },
            DetectError::Template(TemplateError::InvalidDpi(_))
            | DetectError::Raster { .. }
            | DetectError::Input { .. }
            | DetectError::NoPages
            | DetectError::TooManyPages { .. }
            | DetectError::PageOutOfRange { .. } => ApiError::BadRequest(e.to_string()),
            DetectError::Template(_) | DetectError::Task(_) => ApiError::Internal(e.to_string()),
        }
    }
}

impl ApiError {
    /// Map a failed page of a single-page request.
    pub fn from_page_failure(failure: &PageFailure, page: usize) -> Self {
        match &failure.error {
            ExtractError::GeometryMismatch { .. } => ApiError::GeometryMismatch {
                page,
                message: failure.error.to_string(),
            },
            ExtractError::Input(e) => ApiError::BadRequest(format!("page {page}: {e}")),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::UnknownTemplate(_) => StatusCode::NOT_FOUND,
            ApiError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::GeometryMismatch { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
        }

        let body = Json(json!({
            "status": status.as_u16(),
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}
