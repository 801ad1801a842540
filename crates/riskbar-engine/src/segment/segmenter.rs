//! Projection-based band segmentation.

use super::band::Band;
use crate::error::InputError;
use crate::mask::{Axis, ColorMask};

/// Configuration for band segmentation.
///
/// # Example
///
/// ```
/// use riskbar_engine::SegmentOptions;
///
/// let options = SegmentOptions::new()
///     .density_threshold(0.5)
///     .gap_tolerance(1)
///     .min_height(10);
/// assert_eq!(options.min_height, 10);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentOptions {
    /// A row is active when its density is strictly greater than this.
    pub density_threshold: f32,
    /// Inactive runs of at most this many rows between two active runs are
    /// bridged.
    pub gap_tolerance: usize,
    /// Merged runs shorter than this are discarded as noise.
    pub min_height: usize,
}

impl Default for SegmentOptions {
    fn default() -> Self {
        Self {
            density_threshold: 0.35,
            gap_tolerance: 2,
            min_height: 8,
        }
    }
}

impl SegmentOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn density_threshold(mut self, threshold: f32) -> Self {
        self.density_threshold = threshold;
        self
    }

    #[inline]
    pub fn gap_tolerance(mut self, rows: usize) -> Self {
        self.gap_tolerance = rows;
        self
    }

    #[inline]
    pub fn min_height(mut self, rows: usize) -> Self {
        self.min_height = rows;
        self
    }

    pub(crate) fn validate(&self) -> Result<(), InputError> {
        if !(0.0..1.0).contains(&self.density_threshold) {
            return Err(InputError::InvalidOption("segment density_threshold"));
        }
        if self.min_height == 0 {
            return Err(InputError::InvalidOption("segment min_height"));
        }
        Ok(())
    }
}

/// Find bands in a 1-D density profile.
///
/// Runs of active positions are merged across gaps of at most
/// `gap_tolerance`, then filtered by `min_height`. An all-inactive profile
/// yields an empty list.
///
/// # Example
///
/// ```
/// use riskbar_engine::{segment_profile, Band, SegmentOptions};
///
/// let mut profile = vec![0.0; 40];
/// for d in &mut profile[5..15] { *d = 1.0; }
/// for d in &mut profile[25..35] { *d = 1.0; }
///
/// let bands = segment_profile(&profile, &SegmentOptions::new());
/// assert_eq!(bands, vec![Band::new(5, 15), Band::new(25, 35)]);
/// ```
pub fn segment_profile(profile: &[f32], options: &SegmentOptions) -> Vec<Band> {
    let mut runs: Vec<Band> = Vec::new();
    let mut start: Option<usize> = None;

    for (i, &density) in profile.iter().enumerate() {
        let active = density > options.density_threshold;
        match (active, start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                push_run(&mut runs, Band::new(s, i), options.gap_tolerance);
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        push_run(&mut runs, Band::new(s, profile.len()), options.gap_tolerance);
    }

    runs.retain(|band| band.height() >= options.min_height);
    runs
}

/// Append `run`, extending the previous run instead when the gap between
/// them is within tolerance.
fn push_run(runs: &mut Vec<Band>, run: Band, gap_tolerance: usize) {
    if let Some(last) = runs.last_mut() {
        if run.top - last.bottom <= gap_tolerance {
            last.bottom = run.bottom;
            return;
        }
    }
    runs.push(run);
}

/// Segment a mask along `axis`.
///
/// With [`Axis::Rows`] the returned bands are row intervals; with
/// [`Axis::Columns`] they are column intervals.
pub fn segment_axis(mask: &ColorMask, axis: Axis, options: &SegmentOptions) -> Vec<Band> {
    segment_profile(&mask.profile(axis), options)
}

/// Row-wise band segmenter for a stack of horizontal bars.
#[derive(Debug, Clone, Default)]
pub struct BandSegmenter {
    options: SegmentOptions,
}

impl BandSegmenter {
    pub fn new(options: SegmentOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &SegmentOptions {
        &self.options
    }

    /// Bands of `mask`, top to bottom.
    pub fn segment(&self, mask: &ColorMask) -> Vec<Band> {
        segment_axis(mask, Axis::Rows, &self.options)
    }
}
