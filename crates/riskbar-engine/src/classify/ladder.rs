//! Fill-length classification.

use super::RiskLevel;
use crate::error::InputError;

/// One rung of a [`FillLadder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FillStep {
    /// Smallest fill percentage reaching this rung
    pub min_percent: u8,
    pub level: RiskLevel,
}

/// Classifies a bar by how far it is filled.
///
/// Steps are checked in order and the first whose `min_percent` the fill
/// reaches wins; a fill below every step is [`RiskLevel::None`].
///
/// # Example
///
/// ```
/// use riskbar_engine::{FillLadder, RiskLevel};
///
/// let ladder = FillLadder::default();
/// assert_eq!(ladder.level_for(80), RiskLevel::Severe);
/// assert_eq!(ladder.level_for(12), RiskLevel::Normal);
/// assert_eq!(ladder.level_for(3), RiskLevel::None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillLadder {
    pub steps: Vec<FillStep>,
}

impl Default for FillLadder {
    fn default() -> Self {
        Self::new(vec![
            FillStep {
                min_percent: 75,
                level: RiskLevel::Severe,
            },
            FillStep {
                min_percent: 50,
                level: RiskLevel::Moderate,
            },
            FillStep {
                min_percent: 25,
                level: RiskLevel::Mild,
            },
            FillStep {
                min_percent: 10,
                level: RiskLevel::Normal,
            },
        ])
    }
}

impl FillLadder {
    pub fn new(steps: Vec<FillStep>) -> Self {
        Self { steps }
    }

    pub fn level_for(&self, percent: u8) -> RiskLevel {
        self.steps
            .iter()
            .find(|step| percent >= step.min_percent)
            .map_or(RiskLevel::None, |step| step.level)
    }

    pub(crate) fn validate(&self) -> Result<(), InputError> {
        if self.steps.is_empty() {
            return Err(InputError::InvalidOption("fill ladder is empty"));
        }
        if self.steps.iter().any(|s| s.min_percent > 100) {
            return Err(InputError::InvalidOption("fill ladder step above 100%"));
        }
        if self
            .steps
            .iter()
            .any(|s| matches!(s.level, RiskLevel::Undetermined))
        {
            return Err(InputError::InvalidOption("fill ladder maps to undetermined"));
        }
        Ok(())
    }
}
