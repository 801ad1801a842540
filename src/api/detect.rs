use axum::{
    body::Bytes,
    extract::{Query, State},
    response::Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::error::ApiError;
use crate::server::AppState;
use crate::services::{DetectRequest, DetectionReport};

/// Query parameters of a detection request
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DetectParams {
    /// Template name (default: the configured default template)
    pub template: Option<String>,
    /// Template page shown in the upload, 0-based
    pub page: Option<usize>,
    /// Resolution of the upload; overrides the PNG's pHYs chunk
    pub dpi: Option<f32>,
}

/// Read the risk bars of one rendered report page
///
/// The request body is the raw PNG. The page is matched against the
/// template page given by `page`; when the number of bars found differs
/// from the number of labels the request fails with 422, unless the
/// template pads mismatched pages as `undetermined`.
#[utoipa::path(
    post,
    path = "/v1/detect-risk-bars",
    request_body(content = Vec<u8>, content_type = "image/png", description = "Rendered report page"),
    params(DetectParams),
    responses(
        (status = 200, description = "Bars read", body = DetectionReport),
        (status = 400, description = "Not a readable PNG, or bad parameters"),
        (status = 404, description = "Unknown template"),
        (status = 413, description = "Upload too large"),
        (status = 422, description = "Bar count does not match the template"),
    ),
    tag = "Detection"
)]
pub async fn handle_detect(
    State(state): State<AppState>,
    Query(params): Query<DetectParams>,
    body: Bytes,
) -> Result<Json<DetectionReport>, ApiError> {
    let request = DetectRequest {
        template: params.template,
        first_page: params.page.unwrap_or(0),
        dpi: params.dpi,
    };
    tracing::debug!(
        template = ?request.template,
        page = request.first_page,
        bytes = body.len(),
        "Detection request"
    );

    let detection = state
        .extraction
        .detect_blocking(request.clone(), vec![body.to_vec()])
        .await?;

    if let Some(failure) = detection.failures.first() {
        return Err(ApiError::from_page_failure(failure, request.first_page));
    }

    Ok(Json(detection.report))
}
