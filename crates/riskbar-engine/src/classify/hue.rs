//! Hue-rule classification.

use super::measure::{HueMeasurement, Tendency};
use super::{Assessment, RiskLevel};
use crate::color::Hsv;
use crate::error::InputError;
use crate::mask::HueRange;

/// Maps a hue range to a risk level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HueRule {
    pub range: HueRange,
    pub level: RiskLevel,
}

impl HueRule {
    #[inline]
    pub const fn new(start: f32, end: f32, level: RiskLevel) -> Self {
        Self {
            range: HueRange::new(start, end),
            level,
        }
    }
}

/// Short-circuits classification to [`RiskLevel::None`] for fills that are
/// too gray, too dark or too washed out for their hue to mean anything.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorGuard {
    /// Measured saturation below this is background
    pub min_saturation: f32,
    /// Measured value below this is ink-black
    pub min_value: f32,
    /// Fills brighter than this are washed out when they are also paler
    /// than `pale_saturation`
    pub max_value: f32,
    pub pale_saturation: f32,
}

impl Default for ColorGuard {
    fn default() -> Self {
        Self {
            min_saturation: 0.2,
            min_value: 0.2,
            max_value: 0.9,
            pale_saturation: 0.45,
        }
    }
}

impl ColorGuard {
    #[inline]
    pub fn rejects(&self, measurement: &HueMeasurement) -> bool {
        measurement.saturation < self.min_saturation
            || measurement.value < self.min_value
            || self.is_washed_out(measurement)
    }

    #[inline]
    fn is_washed_out(&self, measurement: &HueMeasurement) -> bool {
        measurement.value > self.max_value && measurement.saturation < self.pale_saturation
    }
}

/// Classifies a fill by its representative hue.
///
/// Rules are evaluated top to bottom and the first containing range wins.
/// Ranges are closed, so a hue exactly on the boundary between two rules
/// belongs to the one listed first. Hues matching no rule are
/// [`RiskLevel::None`].
///
/// # Example
///
/// ```
/// use riskbar_engine::{HueClassifier, Hsv, RiskLevel, Rgb8};
///
/// let classifier = HueClassifier::default();
/// let red = vec![Hsv::from(Rgb8::new(230, 20, 20)); 10];
/// assert_eq!(classifier.classify(&red).level, RiskLevel::Severe);
///
/// let gray = vec![Hsv::from(Rgb8::new(180, 180, 180)); 10];
/// assert_eq!(classifier.classify(&gray).level, RiskLevel::None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct HueClassifier {
    pub rules: Vec<HueRule>,
    pub guard: ColorGuard,
    pub tendency: Tendency,
}

impl Default for HueClassifier {
    /// Red is severe, orange moderate, yellow mild.
    fn default() -> Self {
        Self::new(vec![
            HueRule::new(340.0, 20.0, RiskLevel::Severe),
            HueRule::new(20.0, 50.0, RiskLevel::Moderate),
            HueRule::new(50.0, 70.0, RiskLevel::Mild),
        ])
    }
}

impl HueClassifier {
    /// Classifier with the given rules, default guard and median tendency.
    pub fn new(rules: Vec<HueRule>) -> Self {
        Self {
            rules,
            guard: ColorGuard::default(),
            tendency: Tendency::Median,
        }
    }

    #[inline]
    pub fn guard(mut self, guard: ColorGuard) -> Self {
        self.guard = guard;
        self
    }

    #[inline]
    pub fn tendency(mut self, tendency: Tendency) -> Self {
        self.tendency = tendency;
        self
    }

    /// Level for an already measured fill. The guard runs before any rule.
    pub fn level_for(&self, measurement: &HueMeasurement) -> RiskLevel {
        if self.guard.rejects(measurement) {
            return RiskLevel::None;
        }
        self.rules
            .iter()
            .find(|rule| rule.range.contains(measurement.hue))
            .map_or(RiskLevel::None, |rule| rule.level)
    }

    /// Measure `samples` and classify the result.
    pub fn classify(&self, samples: &[Hsv]) -> Assessment {
        let measurement = self.tendency.measure(samples);
        let level = measurement
            .as_ref()
            .map_or(RiskLevel::None, |m| self.level_for(m));
        Assessment { level, measurement }
    }

    pub(crate) fn validate(&self) -> Result<(), InputError> {
        if self.rules.is_empty() {
            return Err(InputError::InvalidOption("hue rules are empty"));
        }
        if self
            .rules
            .iter()
            .any(|r| matches!(r.level, RiskLevel::Undetermined))
        {
            return Err(InputError::InvalidOption("hue rule maps to undetermined"));
        }
        self.rules.iter().try_for_each(|r| r.range.validate())?;
        let g = &self.guard;
        if !(0.0..=1.0).contains(&g.min_saturation)
            || !(0.0..=1.0).contains(&g.pale_saturation)
            || g.min_value > g.max_value
        {
            return Err(InputError::InvalidOption("color guard"));
        }
        Ok(())
    }
}
