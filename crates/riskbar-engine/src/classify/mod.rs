//! Risk classification of a bar's fill.
//!
//! Two scales are available, selected per report template:
//!
//! - [`HueClassifier`]: the color of the fill decides the risk. Ordered
//!   hue rules, first match wins, behind a saturation/value guard.
//! - [`FillLadder`]: the length of the fill decides the risk.
//!
//! A bar without fill is [`RiskLevel::None`] under either scale.

mod hue;
mod ladder;
mod measure;

use std::fmt;

pub use hue::{ColorGuard, HueClassifier, HueRule};
pub use ladder::{FillLadder, FillStep};
pub use measure::{fill_samples, HueMeasurement, Tendency};

use crate::color::Hsv;
use crate::error::InputError;
use crate::span::FillSpan;

/// Discrete risk category of one report row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RiskLevel {
    /// No risk signal (empty or uncolored bar)
    None,
    /// Below mild; only produced by fill-length ladders
    Normal,
    Mild,
    Moderate,
    Severe,
    /// The page's geometry did not match and the row could not be read
    Undetermined,
}

impl RiskLevel {
    /// Lowercase name used in reports and configuration files.
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::None => "none",
            RiskLevel::Normal => "normal",
            RiskLevel::Mild => "mild",
            RiskLevel::Moderate => "moderate",
            RiskLevel::Severe => "severe",
            RiskLevel::Undetermined => "undetermined",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Risk level of one bar plus the color statistics it was derived from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Assessment {
    pub level: RiskLevel,
    pub measurement: Option<HueMeasurement>,
}

/// The rule set turning a measured fill into a [`RiskLevel`].
#[derive(Debug, Clone, PartialEq)]
pub enum RiskScale {
    Hue(HueClassifier),
    FillPercent(FillLadder),
}

impl Default for RiskScale {
    fn default() -> Self {
        RiskScale::Hue(HueClassifier::default())
    }
}

impl RiskScale {
    /// Assess one bar from its fill span and the HSV values of its masked
    /// fill pixels.
    pub fn assess(&self, span: &FillSpan, samples: &[Hsv]) -> Assessment {
        if span.is_empty() {
            return Assessment {
                level: RiskLevel::None,
                measurement: None,
            };
        }
        match self {
            RiskScale::Hue(classifier) => classifier.classify(samples),
            RiskScale::FillPercent(ladder) => Assessment {
                level: ladder.level_for(span.fill_percent()),
                measurement: Tendency::Median.measure(samples),
            },
        }
    }

    pub(crate) fn validate(&self) -> Result<(), InputError> {
        match self {
            RiskScale::Hue(classifier) => classifier.validate(),
            RiskScale::FillPercent(ladder) => ladder.validate(),
        }
    }
}
