//! Extraction service: decoded pages in, detection report out.

use riskbar_engine::{
    DiseaseResult, DocumentExtraction, InputError, PageDiagnostics, PageFailure, PageInput,
    RiskBarExtractor,
};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use thiserror::Error;
use utoipa::ToSchema;

use crate::models::{AppConfig, TemplateError};
use crate::services::raster::{decode_png, RasterError, RasterPage};

/// Engine identifier reported with every result.
pub const ENGINE: &str = concat!("riskbar/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum DetectError {
    #[error("Unknown template: {0}")]
    UnknownTemplate(String),

    #[error("No pages provided")]
    NoPages,

    #[error("Too many pages: {count} (max {max})")]
    TooManyPages { count: usize, max: usize },

    #[error("Template '{template}' has no page {page}")]
    PageOutOfRange { template: String, page: usize },

    #[error("Page {page}: {source}")]
    Raster { page: usize, source: RasterError },

    #[error("Page {page}: {source}")]
    Input { page: usize, source: InputError },

    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    #[error("Extraction task failed: {0}")]
    Task(String),
}

/// Risk reading for one label.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RiskResult {
    /// Filled share of the bar, 0..=100
    pub progression_percent: u8,
    /// `none`, `normal`, `mild`, `moderate`, `severe` or `undetermined`
    pub risk_label: String,
    /// Template page the bar was read from
    pub page: usize,
    /// Band rows `[top, bottom)` within the page crop
    #[serde(skip_serializing_if = "Option::is_none")]
    pub band: Option<[usize; 2]>,
    /// Representative fill hue in degrees
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hue: Option<f32>,
}

/// Per-page diagnostics.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PageReport {
    /// Template page index
    pub page: usize,
    /// SHA-256 of the uploaded PNG
    pub sha256: String,
    pub width: usize,
    pub height: usize,
    /// Resolution the template was scaled to
    pub dpi: f32,
    pub expected_bands: usize,
    /// Detected bands as `[top, bottom)` rows within the crop
    pub bands: Vec<[usize; 2]>,
    pub warnings: Vec<String>,
}

/// Full detection report.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DetectionReport {
    pub engine: String,
    pub template: String,
    pub template_version: u32,
    /// Number of pages uploaded
    pub pages_found: usize,
    pub bands_detected: usize,
    /// Results keyed by label
    pub results: BTreeMap<String, RiskResult>,
    /// Diagnostics of every page that was read
    pub pages: Vec<PageReport>,
    /// One message per failed page
    pub errors: Vec<String>,
}

/// Report plus the typed page failures behind `report.errors`.
#[derive(Debug)]
pub struct Detection {
    pub report: DetectionReport,
    pub failures: Vec<PageFailure>,
}

/// Options of one detection run.
#[derive(Debug, Clone, Default)]
pub struct DetectRequest {
    /// Template name; the configured default when `None`
    pub template: Option<String>,
    /// Template page of the first uploaded page
    pub first_page: usize,
    /// Overrides the DPI read from the PNGs
    pub dpi: Option<f32>,
}

/// Runs the engine against configured templates
pub struct ExtractionService {
    config: Arc<AppConfig>,
}

impl ExtractionService {
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Decode `pages` and read them as consecutive template pages starting
    /// at `request.first_page`.
    ///
    /// Uploaded pages past the template's last page are counted in
    /// `pages_found` but not read. Page-level extraction failures are
    /// collected; the other pages are still read.
    pub fn detect(
        &self,
        request: &DetectRequest,
        pages: &[Vec<u8>],
    ) -> Result<Detection, DetectError> {
        let (name, template) = self
            .config
            .template(request.template.as_deref())
            .ok_or_else(|| {
                DetectError::UnknownTemplate(
                    request
                        .template
                        .clone()
                        .unwrap_or_else(|| self.config.default_template.clone()),
                )
            })?;

        if pages.is_empty() {
            return Err(DetectError::NoPages);
        }
        if pages.len() > self.config.max_pages {
            return Err(DetectError::TooManyPages {
                count: pages.len(),
                max: self.config.max_pages,
            });
        }
        if request.first_page >= template.pages.len() {
            return Err(DetectError::PageOutOfRange {
                template: name.to_string(),
                page: request.first_page,
            });
        }

        let readable = (template.pages.len() - request.first_page).min(pages.len());
        let rasters = pages[..readable]
            .iter()
            .enumerate()
            .map(|(i, bytes)| {
                decode_png(bytes, self.config.max_upload_bytes).map_err(|source| {
                    DetectError::Raster {
                        page: request.first_page + i,
                        source,
                    }
                })
            })
            .collect::<Result<Vec<RasterPage>, _>>()?;

        let dpi = resolve_dpi(request.dpi, &rasters, template.nominal_dpi);
        let extractor = RiskBarExtractor::new(template.profile_for_dpi(dpi)?);
        let layouts = template.layouts_for_dpi(dpi)?;

        let mut inputs = Vec::with_capacity(rasters.len());
        let page_layouts = &layouts[request.first_page..];
        for (i, (raster, layout)) in rasters.iter().zip(page_layouts).enumerate() {
            let region = raster.region().map_err(|source| DetectError::Input {
                page: request.first_page + i,
                source,
            })?;
            inputs.push(PageInput { region, layout });
        }
        let document = extractor.extract_document(&inputs);

        let label_pages: HashMap<&str, usize> = template
            .pages
            .iter()
            .enumerate()
            .flat_map(|(page, spec)| spec.labels.iter().map(move |l| (l.as_str(), page)))
            .collect();
        let report = build_report(
            ReportContext {
                template: name,
                version: template.version,
                pages_found: pages.len(),
                first_page: request.first_page,
                dpi,
                label_pages: &label_pages,
            },
            &rasters,
            &document,
        );

        tracing::info!(
            template = %name,
            pages = pages.len(),
            read = readable,
            dpi,
            bands = report.bands_detected,
            results = report.results.len(),
            failures = document.failures.len(),
            "Detection finished"
        );
        for failure in &document.failures {
            tracing::warn!(
                page = request.first_page + failure.page,
                error = %failure.error,
                "Page failed"
            );
        }
        for page in &report.pages {
            for warning in &page.warnings {
                tracing::debug!(page = page.page, %warning, "Layout warning");
            }
        }

        Ok(Detection {
            report,
            failures: document.failures,
        })
    }

    /// [`detect`](Self::detect) on the blocking thread pool.
    pub async fn detect_blocking(
        self: &Arc<Self>,
        request: DetectRequest,
        pages: Vec<Vec<u8>>,
    ) -> Result<Detection, DetectError> {
        let service = Arc::clone(self);
        tokio::task::spawn_blocking(move || service.detect(&request, &pages))
            .await
            .map_err(|e| DetectError::Task(e.to_string()))?
    }
}

/// Explicit DPI wins, then the first page's `pHYs`, then the template's
/// nominal DPI.
fn resolve_dpi(requested: Option<f32>, rasters: &[RasterPage], nominal: u32) -> f32 {
    if let Some(dpi) = requested {
        return dpi;
    }
    let embedded = rasters.first().and_then(|r| r.dpi);
    if let Some(dpi) = embedded {
        if rasters.iter().any(|r| r.dpi.is_some_and(|d| (d - dpi).abs() > 1.0)) {
            tracing::warn!(dpi, "Pages have different DPI, using the first page's");
        }
        return dpi.round();
    }
    nominal as f32
}

struct ReportContext<'a> {
    template: &'a str,
    version: u32,
    pages_found: usize,
    first_page: usize,
    dpi: f32,
    label_pages: &'a HashMap<&'a str, usize>,
}

fn build_report(
    ctx: ReportContext<'_>,
    rasters: &[RasterPage],
    document: &DocumentExtraction,
) -> DetectionReport {
    let results = document
        .results
        .iter()
        .map(|(label, result)| {
            let page = ctx
                .label_pages
                .get(label.as_str())
                .copied()
                .unwrap_or(ctx.first_page);
            (label.clone(), risk_result(result, page))
        })
        .collect();

    let pages = document
        .pages
        .iter()
        .map(|diag| {
            let page = ctx.first_page + diag.page;
            page_report(diag, &rasters[diag.page], ctx.dpi, page)
        })
        .collect();

    DetectionReport {
        engine: ENGINE.to_string(),
        template: ctx.template.to_string(),
        template_version: ctx.version,
        pages_found: ctx.pages_found,
        bands_detected: document.bands_detected(),
        results,
        pages,
        errors: document
            .failures
            .iter()
            .map(|f| format!("page {}: {}", ctx.first_page + f.page, f.error))
            .collect(),
    }
}

fn risk_result(result: &DiseaseResult, page: usize) -> RiskResult {
    RiskResult {
        progression_percent: result.fill_percent,
        risk_label: result.risk.as_str().to_string(),
        page,
        band: result.band.map(|b| [b.top, b.bottom]),
        hue: result.measurement.map(|m| m.hue),
    }
}

fn page_report(diag: &PageDiagnostics, raster: &RasterPage, dpi: f32, page: usize) -> PageReport {
    PageReport {
        page,
        sha256: raster.sha256.clone(),
        width: diag.width,
        height: diag.height,
        dpi,
        expected_bands: diag.expected_bands,
        bands: diag.bands.iter().map(|b| [b.top, b.bottom]).collect(),
        warnings: diag.warnings.clone(),
    }
}
