//! HTTP server setup and configuration.
//!
//! This module provides the router and application state used by both
//! the production server and integration tests.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::models::AppConfig;
use crate::services::ExtractionService;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub extraction: Arc<ExtractionService>,
}

/// Create application state from a loaded configuration.
///
/// Fails when the configured default template is missing, since every
/// request without an explicit template would fail.
pub fn create_app_state(config: Arc<AppConfig>) -> anyhow::Result<AppState> {
    if config.template(None).is_none() {
        anyhow::bail!(
            "Default template '{}' is not configured (available: {})",
            config.default_template,
            config.template_names().join(", ")
        );
    }
    let extraction = Arc::new(ExtractionService::new(config.clone()));

    Ok(AppState { config, extraction })
}

/// Build the API router with all endpoints and middleware.
///
/// This is the core router used by both production and tests.
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/v1/detect-risk-bars", post(api::handle_detect))
        .route("/v1/templates", get(api::handle_templates))
        // Health check
        .route("/health", get(|| async { "OK" }))
        .with_state(state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
}
