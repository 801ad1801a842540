//! Extraction results and diagnostics.

use std::collections::BTreeMap;
use std::fmt;

use crate::classify::{HueMeasurement, RiskLevel};
use crate::error::ExtractError;
use crate::segment::Band;
use crate::span::ColumnRange;

/// Reading of one labeled report row.
#[derive(Debug, Clone, PartialEq)]
pub struct DiseaseResult {
    pub label: String,
    /// Bar fill, `0..=100`
    pub fill_percent: u8,
    pub risk: RiskLevel,
    /// Band the row was read from, relative to the page crop
    pub band: Option<Band>,
    /// Filled columns within the crop
    pub span: Option<ColumnRange>,
    /// Fill color statistics, when the bar had any fill
    pub measurement: Option<HueMeasurement>,
}

impl DiseaseResult {
    /// A row that could not be read because the page geometry did not match.
    pub fn undetermined(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            fill_percent: 0,
            risk: RiskLevel::Undetermined,
            band: None,
            span: None,
            measurement: None,
        }
    }
}

/// What the engine saw on one page.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PageDiagnostics {
    /// Zero-based page index
    pub page: usize,
    /// Size of the analysed (cropped) region
    pub width: usize,
    pub height: usize,
    pub expected_bands: usize,
    pub bands: Vec<Band>,
    pub warnings: Vec<String>,
}

/// Results of one successfully processed page, in label order.
#[derive(Debug, Clone, PartialEq)]
pub struct PageExtraction {
    pub results: Vec<DiseaseResult>,
    pub diagnostics: PageDiagnostics,
}

impl PageExtraction {
    /// Result for `label`, if the page declares it.
    pub fn get(&self, label: &str) -> Option<&DiseaseResult> {
        self.results.iter().find(|r| r.label == label)
    }
}

/// A page that could not be processed.
#[derive(Debug, Clone, PartialEq)]
pub struct PageFailure {
    pub page: usize,
    pub error: ExtractError,
}

impl fmt::Display for PageFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "page {}: {}", self.page, self.error)
    }
}

/// Combined results of a multi-page document.
///
/// Failed pages do not abort the document: their labels are simply absent
/// from `results` and the reason is listed in `failures`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DocumentExtraction {
    pub results: BTreeMap<String, DiseaseResult>,
    /// Diagnostics of the pages that were processed
    pub pages: Vec<PageDiagnostics>,
    pub failures: Vec<PageFailure>,
}

impl DocumentExtraction {
    /// Total bands detected across processed pages.
    pub fn bands_detected(&self) -> usize {
        self.pages.iter().map(|p| p.bands.len()).sum()
    }

    /// Human-readable failure descriptions.
    pub fn errors(&self) -> Vec<String> {
        self.failures.iter().map(ToString::to_string).collect()
    }

    /// True when every page was processed.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}
