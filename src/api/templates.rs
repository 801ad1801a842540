use axum::{extract::State, response::Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::TemplateSummary;
use crate::server::AppState;

/// Response of the template listing
#[derive(Debug, Serialize, ToSchema)]
pub struct TemplatesResponse {
    /// Template used when a request names none
    pub default_template: String,
    pub templates: Vec<TemplateSummary>,
}

/// List report templates
///
/// Returns every configured template with its labels, page by page.
#[utoipa::path(
    get,
    path = "/v1/templates",
    responses(
        (status = 200, description = "Configured templates", body = TemplatesResponse),
    ),
    tag = "Templates"
)]
pub async fn handle_templates(State(state): State<AppState>) -> Json<TemplatesResponse> {
    let config = &state.config;
    let templates = config
        .template_names()
        .into_iter()
        .filter_map(|name| config.template(Some(name)))
        .map(|(name, spec)| spec.summary(name))
        .collect();

    Json(TemplatesResponse {
        default_template: config.default_template.clone(),
        templates,
    })
}
