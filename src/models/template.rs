//! Report templates: page geometry, labels and thresholds for one report
//! layout version.
//!
//! Templates are read from `config.yaml` and converted into the engine's
//! [`ExtractionProfile`] and [`PageLayout`] values. Pixel quantities are
//! stored at `nominal_dpi` and rescaled to the raster's actual DPI.

use riskbar_engine::{
    BackgroundGate, ColorGuard, ExtractionProfile, FillLadder, FillStep, HueClassifier, HueRange,
    HueRule, InkGate, InputError, MismatchPolicy, PageLayout, Rect, RiskLevel, RiskScale,
    RowAnchors, SegmentOptions, SpanOptions, Tendency,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use utoipa::ToSchema;

/// Lowest and highest DPI a page may be processed at.
pub const DPI_RANGE: std::ops::RangeInclusive<f32> = 36.0..=1200.0;

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template has no pages")]
    NoPages,

    #[error("Unsupported DPI: {0}")]
    InvalidDpi(f32),

    #[error("Invalid thresholds: {0}")]
    Profile(InputError),

    #[error("Page {page}: {source}")]
    Page { page: usize, source: InputError },

    #[error("Label '{label}' appears on pages {first} and {second}")]
    DuplicateLabel {
        label: String,
        first: usize,
        second: usize,
    },
}

/// One report layout version.
#[derive(Debug, Clone, Deserialize)]
pub struct TemplateSpec {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default)]
    pub description: String,

    /// DPI at which all pixel values below are given
    #[serde(default = "default_dpi")]
    pub nominal_dpi: u32,

    #[serde(default)]
    pub mismatch: MismatchSpec,

    #[serde(default)]
    pub mask: MaskSpec,

    #[serde(default)]
    pub background: BackgroundSpec,

    #[serde(default)]
    pub segment: SegmentSpec,

    #[serde(default)]
    pub span: SpanSpec,

    #[serde(default)]
    pub classifier: ClassifierSpec,

    pub pages: Vec<PageSpec>,
}

fn default_version() -> u32 {
    1
}

fn default_dpi() -> u32 {
    300
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MismatchSpec {
    #[default]
    Fail,
    PadUndetermined,
}

/// Ink mask thresholds
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MaskSpec {
    pub saturation_threshold: f32,
    pub value_threshold: f32,
    pub hue_ranges: Vec<RangeSpec>,
}

impl Default for MaskSpec {
    fn default() -> Self {
        let gate = InkGate::default();
        Self {
            saturation_threshold: gate.saturation_threshold,
            value_threshold: gate.value_threshold,
            hue_ranges: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RangeSpec {
    pub start: f32,
    pub end: f32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BackgroundSpec {
    pub value_floor: f32,
    pub saturation_ceiling: f32,
}

impl Default for BackgroundSpec {
    fn default() -> Self {
        let gate = BackgroundGate::default();
        Self {
            value_floor: gate.value_floor,
            saturation_ceiling: gate.saturation_ceiling,
        }
    }
}

/// Band segmentation; `gap_tolerance` and `min_height` are pixels at
/// nominal DPI.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SegmentSpec {
    pub density_threshold: f32,
    pub gap_tolerance: usize,
    pub min_height: usize,
}

impl Default for SegmentSpec {
    fn default() -> Self {
        let options = SegmentOptions::default();
        Self {
            density_threshold: options.density_threshold,
            gap_tolerance: options.gap_tolerance,
            min_height: options.min_height,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SpanSpec {
    pub window_start: f32,
    pub window_end: f32,
    pub min_width_ratio: f32,
}

impl Default for SpanSpec {
    fn default() -> Self {
        let options = SpanOptions::default();
        Self {
            window_start: options.window_start,
            window_end: options.window_end,
            min_width_ratio: options.min_width_ratio,
        }
    }
}

/// Risk scale, tagged by `scale: hue | fill_percent`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "scale", rename_all = "snake_case")]
pub enum ClassifierSpec {
    Hue {
        #[serde(default)]
        tendency: TendencySpec,
        #[serde(default)]
        guard: GuardSpec,
        #[serde(default = "default_rules")]
        rules: Vec<RuleSpec>,
    },
    FillPercent {
        #[serde(default = "default_steps")]
        steps: Vec<StepSpec>,
    },
}

impl Default for ClassifierSpec {
    fn default() -> Self {
        ClassifierSpec::Hue {
            tendency: TendencySpec::default(),
            guard: GuardSpec::default(),
            rules: default_rules(),
        }
    }
}

impl ClassifierSpec {
    /// Name of the scale as written in the config
    pub fn scale_name(&self) -> &'static str {
        match self {
            ClassifierSpec::Hue { .. } => "hue",
            ClassifierSpec::FillPercent { .. } => "fill_percent",
        }
    }
}

fn default_rules() -> Vec<RuleSpec> {
    HueClassifier::default()
        .rules
        .iter()
        .filter_map(|rule| {
            LevelSpec::from_level(rule.level).map(|level| RuleSpec {
                start: rule.range.start,
                end: rule.range.end,
                level,
            })
        })
        .collect()
}

fn default_steps() -> Vec<StepSpec> {
    FillLadder::default()
        .steps
        .iter()
        .filter_map(|step| {
            LevelSpec::from_level(step.level).map(|level| StepSpec {
                min_percent: step.min_percent,
                level,
            })
        })
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TendencySpec {
    #[default]
    Median,
    Mean,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GuardSpec {
    pub min_saturation: f32,
    pub min_value: f32,
    pub max_value: f32,
    pub pale_saturation: f32,
}

impl Default for GuardSpec {
    fn default() -> Self {
        let guard = ColorGuard::default();
        Self {
            min_saturation: guard.min_saturation,
            min_value: guard.min_value,
            max_value: guard.max_value,
            pale_saturation: guard.pale_saturation,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RuleSpec {
    pub start: f32,
    pub end: f32,
    pub level: LevelSpec,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct StepSpec {
    pub min_percent: u8,
    pub level: LevelSpec,
}

/// Levels a rule may map to. `undetermined` is reserved for geometry
/// mismatches and cannot be configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelSpec {
    None,
    Normal,
    Mild,
    Moderate,
    Severe,
}

impl LevelSpec {
    fn from_level(level: RiskLevel) -> Option<Self> {
        match level {
            RiskLevel::None => Some(LevelSpec::None),
            RiskLevel::Normal => Some(LevelSpec::Normal),
            RiskLevel::Mild => Some(LevelSpec::Mild),
            RiskLevel::Moderate => Some(LevelSpec::Moderate),
            RiskLevel::Severe => Some(LevelSpec::Severe),
            RiskLevel::Undetermined => None,
        }
    }
}

impl From<LevelSpec> for RiskLevel {
    fn from(level: LevelSpec) -> Self {
        match level {
            LevelSpec::None => RiskLevel::None,
            LevelSpec::Normal => RiskLevel::Normal,
            LevelSpec::Mild => RiskLevel::Mild,
            LevelSpec::Moderate => RiskLevel::Moderate,
            LevelSpec::Severe => RiskLevel::Severe,
        }
    }
}

/// Geometry and labels of one page.
#[derive(Debug, Clone, Deserialize)]
pub struct PageSpec {
    #[serde(default)]
    pub crop: Option<CropSpec>,
    #[serde(default)]
    pub anchors: Option<AnchorSpec>,
    pub labels: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CropSpec {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct AnchorSpec {
    pub first_top: usize,
    pub pitch: usize,
    #[serde(default = "default_tolerance")]
    pub tolerance: usize,
}

fn default_tolerance() -> usize {
    8
}

/// Public summary of a template, as listed by the API.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TemplateSummary {
    /// Template name used in requests
    pub name: String,
    pub version: u32,
    pub description: String,
    pub nominal_dpi: u32,
    /// `hue` or `fill_percent`
    pub scale: String,
    /// Labels per page, top to bottom
    pub pages: Vec<Vec<String>>,
}

/// Scale a pixel quantity, never below `floor`.
fn scale_px(px: usize, factor: f32, floor: usize) -> usize {
    ((px as f32 * factor).round() as usize).max(floor)
}

impl TemplateSpec {
    /// Check that the template produces a valid profile and valid page
    /// layouts, and that no label is used twice.
    pub fn validate(&self) -> Result<(), TemplateError> {
        if self.pages.is_empty() {
            return Err(TemplateError::NoPages);
        }
        let dpi = self.nominal_dpi as f32;
        if !DPI_RANGE.contains(&dpi) {
            return Err(TemplateError::InvalidDpi(dpi));
        }
        self.profile_for_dpi(dpi)?
            .validate()
            .map_err(TemplateError::Profile)?;

        let mut owner: HashMap<&str, usize> = HashMap::new();
        for (page, layout) in self.pages.iter().enumerate() {
            self.layout(page, 1.0)
                .validate()
                .map_err(|source| TemplateError::Page { page, source })?;
            for label in &layout.labels {
                if let Some(&first) = owner.get(label.as_str()) {
                    return Err(TemplateError::DuplicateLabel {
                        label: label.clone(),
                        first,
                        second: page,
                    });
                }
                owner.insert(label, page);
            }
        }
        Ok(())
    }

    fn factor(&self, dpi: f32) -> Result<f32, TemplateError> {
        if !DPI_RANGE.contains(&dpi) {
            return Err(TemplateError::InvalidDpi(dpi));
        }
        Ok(dpi / self.nominal_dpi.max(1) as f32)
    }

    /// Engine profile for a raster at `dpi`.
    pub fn profile_for_dpi(&self, dpi: f32) -> Result<ExtractionProfile, TemplateError> {
        let factor = self.factor(dpi)?;

        let ink = InkGate {
            saturation_threshold: self.mask.saturation_threshold,
            value_threshold: self.mask.value_threshold,
            hue_ranges: self
                .mask
                .hue_ranges
                .iter()
                .map(|r| HueRange::new(r.start, r.end))
                .collect(),
        };
        let background = BackgroundGate {
            value_floor: self.background.value_floor,
            saturation_ceiling: self.background.saturation_ceiling,
        };
        let segment = SegmentOptions::new()
            .density_threshold(self.segment.density_threshold)
            .gap_tolerance(scale_px(self.segment.gap_tolerance, factor, 0))
            .min_height(scale_px(self.segment.min_height, factor, 1));
        let span = SpanOptions::new()
            .window(self.span.window_start, self.span.window_end)
            .min_width_ratio(self.span.min_width_ratio);

        let scale = match &self.classifier {
            ClassifierSpec::Hue {
                tendency,
                guard,
                rules,
            } => RiskScale::Hue(
                HueClassifier::new(
                    rules
                        .iter()
                        .map(|r| HueRule::new(r.start, r.end, r.level.into()))
                        .collect(),
                )
                .guard(ColorGuard {
                    min_saturation: guard.min_saturation,
                    min_value: guard.min_value,
                    max_value: guard.max_value,
                    pale_saturation: guard.pale_saturation,
                })
                .tendency(match tendency {
                    TendencySpec::Median => Tendency::Median,
                    TendencySpec::Mean => Tendency::Mean,
                }),
            ),
            ClassifierSpec::FillPercent { steps } => RiskScale::FillPercent(FillLadder::new(
                steps
                    .iter()
                    .map(|s| FillStep {
                        min_percent: s.min_percent,
                        level: s.level.into(),
                    })
                    .collect(),
            )),
        };

        let mismatch = match self.mismatch {
            MismatchSpec::Fail => MismatchPolicy::Fail,
            MismatchSpec::PadUndetermined => MismatchPolicy::PadUndetermined,
        };

        Ok(ExtractionProfile {
            background,
            ink,
            segment,
            span,
            scale,
            mismatch,
        })
    }

    /// Page layouts for a raster at `dpi`, one per template page.
    pub fn layouts_for_dpi(&self, dpi: f32) -> Result<Vec<PageLayout>, TemplateError> {
        let factor = self.factor(dpi)?;
        Ok((0..self.pages.len())
            .map(|page| self.layout(page, factor))
            .collect())
    }

    fn layout(&self, page: usize, factor: f32) -> PageLayout {
        let spec = &self.pages[page];
        let mut layout = PageLayout::new(spec.labels.iter().cloned());
        if let Some(crop) = spec.crop {
            layout = layout.crop(Rect::new(
                scale_px(crop.x, factor, 0),
                scale_px(crop.y, factor, 0),
                scale_px(crop.width, factor, 1),
                scale_px(crop.height, factor, 1),
            ));
        }
        if let Some(anchors) = spec.anchors {
            layout = layout.anchors(RowAnchors {
                first_top: scale_px(anchors.first_top, factor, 0),
                pitch: scale_px(anchors.pitch, factor, 1),
                tolerance: scale_px(anchors.tolerance, factor, 1),
            });
        }
        layout
    }

    pub fn summary(&self, name: &str) -> TemplateSummary {
        TemplateSummary {
            name: name.to_string(),
            version: self.version,
            description: self.description.clone(),
            nominal_dpi: self.nominal_dpi,
            scale: self.classifier.scale_name().to_string(),
            pages: self.pages.iter().map(|p| p.labels.clone()).collect(),
        }
    }

    /// Total number of labels across all pages
    pub fn label_count(&self) -> usize {
        self.pages.iter().map(|p| p.labels.len()).sum()
    }
}
