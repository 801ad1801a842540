//! Expected geometry of one page.

use std::collections::HashSet;

use crate::error::InputError;
use crate::region::Rect;
use crate::segment::Band;

/// Where the bars of one page should be and what they are called.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PageLayout {
    /// Row labels, top to bottom
    pub labels: Vec<String>,
    /// Area of the page holding the bar stack; whole page when `None`
    pub crop: Option<Rect>,
    /// Expected band positions, used only for plausibility warnings
    pub anchors: Option<RowAnchors>,
}

impl PageLayout {
    /// Layout covering the whole region with the given labels.
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
            crop: None,
            anchors: None,
        }
    }

    #[inline]
    pub fn crop(mut self, rect: Rect) -> Self {
        self.crop = Some(rect);
        self
    }

    #[inline]
    pub fn anchors(mut self, anchors: RowAnchors) -> Self {
        self.anchors = Some(anchors);
        self
    }

    /// Labels must be present and unique.
    pub fn validate(&self) -> Result<(), InputError> {
        if self.labels.is_empty() {
            return Err(InputError::NoLabels);
        }
        let mut seen = HashSet::new();
        for label in &self.labels {
            if !seen.insert(label.as_str()) {
                return Err(InputError::DuplicateLabel(label.clone()));
            }
        }
        Ok(())
    }
}

/// Nominal band positions: band `i` should start near
/// `first_top + i * pitch`, relative to the crop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowAnchors {
    pub first_top: usize,
    pub pitch: usize,
    /// Allowed distance in rows before a warning is raised
    pub tolerance: usize,
}

impl RowAnchors {
    /// Expected top row of band `index`.
    #[inline]
    pub fn expected_top(&self, index: usize) -> usize {
        self.first_top + index * self.pitch
    }

    /// One warning per band whose top is further than `tolerance` rows
    /// from its anchor.
    pub fn check(&self, bands: &[Band]) -> Vec<String> {
        bands
            .iter()
            .enumerate()
            .filter_map(|(i, band)| {
                let expected = self.expected_top(i);
                (band.top.abs_diff(expected) > self.tolerance).then(|| {
                    format!(
                        "band {} starts at row {}, anchor expects {} (+/-{})",
                        i, band.top, expected, self.tolerance
                    )
                })
            })
            .collect()
    }
}
