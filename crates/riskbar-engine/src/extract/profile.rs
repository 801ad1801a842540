//! Extraction configuration for one report-template version.

use crate::classify::RiskScale;
use crate::error::InputError;
use crate::mask::{BackgroundGate, InkGate};
use crate::segment::SegmentOptions;
use crate::span::SpanOptions;

/// What to do when a page's band count differs from its label count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MismatchPolicy {
    /// Fail the page with [`ExtractError::GeometryMismatch`](crate::ExtractError::GeometryMismatch).
    #[default]
    Fail,
    /// Report every label of the page as
    /// [`RiskLevel::Undetermined`](crate::RiskLevel::Undetermined). Bands
    /// are never assigned to labels when the counts disagree.
    PadUndetermined,
}

/// Every threshold the engine uses, in one place.
///
/// A profile corresponds to one version of one report layout. It is plain
/// data: build it once, validate it, and share it across requests.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExtractionProfile {
    pub background: BackgroundGate,
    pub ink: InkGate,
    pub segment: SegmentOptions,
    pub span: SpanOptions,
    pub scale: RiskScale,
    pub mismatch: MismatchPolicy,
}

impl ExtractionProfile {
    /// Check every threshold for range errors.
    pub fn validate(&self) -> Result<(), InputError> {
        self.background.validate()?;
        self.ink.validate()?;
        self.segment.validate()?;
        self.span.validate()?;
        self.scale.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{FillLadder, HueClassifier};

    #[test]
    fn test_default_profile_is_valid() {
        let profile = ExtractionProfile::default();
        assert!(profile.validate().is_ok());
        assert_eq!(profile.mismatch, MismatchPolicy::Fail);
    }

    #[test]
    fn test_invalid_parts_are_reported() {
        let profile = ExtractionProfile {
            scale: RiskScale::Hue(HueClassifier::new(vec![])),
            ..ExtractionProfile::default()
        };
        assert_eq!(
            profile.validate(),
            Err(InputError::InvalidOption("hue rules are empty"))
        );

        let profile = ExtractionProfile {
            scale: RiskScale::FillPercent(FillLadder::new(vec![])),
            ..ExtractionProfile::default()
        };
        assert!(profile.validate().is_err());
    }
}
