//! RiskBarExtractor builder -- the entry point of the engine.

use std::collections::HashSet;

use super::layout::PageLayout;
use super::profile::{ExtractionProfile, MismatchPolicy};
use super::report::{DiseaseResult, DocumentExtraction, PageDiagnostics, PageExtraction, PageFailure};
use crate::classify::{fill_samples, RiskScale};
use crate::error::{ExtractError, InputError};
use crate::mask::{BackgroundGate, ColorMask, InkGate};
use crate::region::PixelRegion;
use crate::segment::{Band, BandSegmenter, SegmentOptions};
use crate::span::{extract_span, SpanOptions};

/// One page of a document together with its expected layout.
#[derive(Debug, Clone, Copy)]
pub struct PageInput<'a> {
    pub region: PixelRegion<'a>,
    pub layout: &'a PageLayout,
}

/// Reads the risk bars of report pages.
///
/// The extractor holds only configuration. [`extract_page()`](Self::extract_page)
/// takes `&self` and keeps no state between calls, so one extractor can
/// serve any number of pages, from any number of threads.
///
/// # Example
///
/// ```
/// use riskbar_engine::{PixelRegion, RiskBarExtractor, RiskLevel};
///
/// // 60x40 white page with one red bar on rows 10..20
/// let mut data = vec![255u8; 60 * 40 * 3];
/// for y in 10..20 {
///     for x in 0..60 {
///         let i = (y * 60 + x) * 3;
///         data[i..i + 3].copy_from_slice(&[230, 20, 20]);
///     }
/// }
/// let region = PixelRegion::new(&data, 60, 40).unwrap();
///
/// let page = RiskBarExtractor::default().extract(&region, &["lipids"]).unwrap();
/// let lipids = page.get("lipids").unwrap();
/// assert_eq!(lipids.risk, RiskLevel::Severe);
/// assert!(lipids.fill_percent >= 95);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RiskBarExtractor {
    profile: ExtractionProfile,
}

impl RiskBarExtractor {
    pub fn new(profile: ExtractionProfile) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> &ExtractionProfile {
        &self.profile
    }

    #[inline]
    pub fn background(mut self, gate: BackgroundGate) -> Self {
        self.profile.background = gate;
        self
    }

    #[inline]
    pub fn ink(mut self, gate: InkGate) -> Self {
        self.profile.ink = gate;
        self
    }

    #[inline]
    pub fn segment(mut self, options: SegmentOptions) -> Self {
        self.profile.segment = options;
        self
    }

    #[inline]
    pub fn span(mut self, options: SpanOptions) -> Self {
        self.profile.span = options;
        self
    }

    #[inline]
    pub fn scale(mut self, scale: RiskScale) -> Self {
        self.profile.scale = scale;
        self
    }

    #[inline]
    pub fn mismatch(mut self, policy: MismatchPolicy) -> Self {
        self.profile.mismatch = policy;
        self
    }

    /// Read a single uncropped page whose rows carry `labels`, top to bottom.
    pub fn extract<S: AsRef<str>>(
        &self,
        region: &PixelRegion<'_>,
        labels: &[S],
    ) -> Result<PageExtraction, ExtractError> {
        let layout = PageLayout::new(labels.iter().map(|l| l.as_ref().to_string()));
        self.extract_page(region, &layout, 0)
    }

    /// Read one page.
    ///
    /// 1. Crop to the layout's bar area
    /// 2. Segment the structure mask into bands
    /// 3. Compare band count with label count (see [`MismatchPolicy`])
    /// 4. For each band/label pair in order: fill span, then risk
    pub fn extract_page(
        &self,
        region: &PixelRegion<'_>,
        layout: &PageLayout,
        page: usize,
    ) -> Result<PageExtraction, ExtractError> {
        self.profile.validate()?;
        layout.validate()?;

        let region = match layout.crop {
            Some(rect) => region.sub_region(rect)?,
            None => *region,
        };

        let structure = ColorMask::structure(&region, &self.profile.background);
        let bands = BandSegmenter::new(self.profile.segment.clone()).segment(&structure);

        let mut diagnostics = PageDiagnostics {
            page,
            width: region.width(),
            height: region.height(),
            expected_bands: layout.labels.len(),
            bands: bands.clone(),
            warnings: Vec::new(),
        };
        if let Some(anchors) = layout.anchors {
            diagnostics.warnings.extend(anchors.check(&bands));
        }

        if bands.len() != layout.labels.len() {
            match self.profile.mismatch {
                MismatchPolicy::Fail => {
                    return Err(ExtractError::GeometryMismatch {
                        page,
                        expected: layout.labels.len(),
                        detected: bands.len(),
                    });
                }
                MismatchPolicy::PadUndetermined => {
                    diagnostics.warnings.push(format!(
                        "expected {} bands, detected {}; all rows undetermined",
                        layout.labels.len(),
                        bands.len()
                    ));
                    return Ok(PageExtraction {
                        results: layout
                            .labels
                            .iter()
                            .map(DiseaseResult::undetermined)
                            .collect(),
                        diagnostics,
                    });
                }
            }
        }

        let ink = ColorMask::ink(&region, &self.profile.ink);
        let results = bands
            .iter()
            .zip(&layout.labels)
            .map(|(&band, label)| self.read_bar(&region, &ink, band, label))
            .collect();

        Ok(PageExtraction {
            results,
            diagnostics,
        })
    }

    /// Read every page of a document.
    ///
    /// A failing page is recorded and skipped; the remaining pages are
    /// still processed. A label already claimed by an earlier page fails
    /// the later page.
    pub fn extract_document(&self, pages: &[PageInput<'_>]) -> DocumentExtraction {
        let mut document = DocumentExtraction::default();
        let mut claimed: HashSet<&str> = HashSet::new();

        for (index, input) in pages.iter().enumerate() {
            if let Some(dup) = input
                .layout
                .labels
                .iter()
                .find(|l| claimed.contains(l.as_str()))
            {
                document.failures.push(PageFailure {
                    page: index,
                    error: InputError::DuplicateLabel(dup.clone()).into(),
                });
                continue;
            }
            claimed.extend(input.layout.labels.iter().map(String::as_str));

            match self.extract_page(&input.region, input.layout, index) {
                Ok(extraction) => {
                    for result in extraction.results {
                        document.results.insert(result.label.clone(), result);
                    }
                    document.pages.push(extraction.diagnostics);
                }
                Err(error) => document.failures.push(PageFailure { page: index, error }),
            }
        }

        document
    }

    fn read_bar(
        &self,
        region: &PixelRegion<'_>,
        ink: &ColorMask,
        band: Band,
        label: &str,
    ) -> DiseaseResult {
        let span = extract_span(ink, band, &self.profile.span);
        let samples = match span.range {
            Some(range) => fill_samples(region, ink, band, range),
            None => Vec::new(),
        };
        let assessment = self.profile.scale.assess(&span, &samples);

        DiseaseResult {
            label: label.to_string(),
            fill_percent: span.fill_percent(),
            risk: assessment.level,
            band: Some(band),
            span: span.range,
            measurement: assessment.measurement,
        }
    }
}
