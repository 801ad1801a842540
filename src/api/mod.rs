pub mod detect;
pub mod templates;

pub use detect::{handle_detect, DetectParams, __path_handle_detect};
pub use templates::{handle_templates, TemplatesResponse, __path_handle_templates};

use utoipa::OpenApi;

use crate::models::TemplateSummary;
use crate::services::{DetectionReport, PageReport, RiskResult};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Riskbar API",
        description = "Reads colored risk bars from rendered report pages",
        version = "0.1.0",
        license(name = "MIT")
    ),
    paths(handle_detect, handle_templates),
    components(schemas(
        DetectionReport,
        PageReport,
        RiskResult,
        TemplateSummary,
        TemplatesResponse,
    )),
    tags(
        (name = "Detection", description = "Risk bar extraction"),
        (name = "Templates", description = "Report layouts")
    )
)]
pub struct ApiDoc;
