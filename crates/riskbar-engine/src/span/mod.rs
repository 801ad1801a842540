//! Fill-span extraction.
//!
//! Inside one band, the colored fill of a bar is the horizontal run between
//! the first and last column holding any ink. Its length relative to the
//! usable track width is the bar's fill ratio.

use crate::error::InputError;
use crate::mask::ColorMask;
use crate::segment::Band;

/// Inclusive column interval, relative to the full strip width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnRange {
    pub first: usize,
    pub last: usize,
}

/// Horizontal extent of a bar's colored fill.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FillSpan {
    /// Filled columns, or `None` when the band holds no usable signal.
    pub range: Option<ColumnRange>,
    /// `(last - first) / usable_width`, clamped to `0.0..=1.0`. Zero when empty.
    pub width_ratio: f32,
}

impl FillSpan {
    /// The "no signal" span.
    pub const EMPTY: FillSpan = FillSpan {
        range: None,
        width_ratio: 0.0,
    };

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.range.is_none()
    }

    /// Fill as a whole percentage, rounded to nearest.
    pub fn fill_percent(&self) -> u8 {
        (self.width_ratio * 100.0).round().clamp(0.0, 100.0) as u8
    }
}

/// Configuration for fill-span extraction.
///
/// The window excludes decoration at the ends of a bar track (legends,
/// end caps). It is given as fractions of the strip width.
#[derive(Debug, Clone, PartialEq)]
pub struct SpanOptions {
    /// Left edge of the usable window, `0.0..1.0`.
    pub window_start: f32,
    /// Right edge of the usable window, `window_start..=1.0`.
    pub window_end: f32,
    /// Spans narrower than this fraction of the usable width are treated
    /// as artifacts and reported empty.
    pub min_width_ratio: f32,
}

impl Default for SpanOptions {
    fn default() -> Self {
        Self {
            window_start: 0.0,
            window_end: 1.0,
            min_width_ratio: 0.02,
        }
    }
}

impl SpanOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn window(mut self, start: f32, end: f32) -> Self {
        self.window_start = start;
        self.window_end = end;
        self
    }

    #[inline]
    pub fn min_width_ratio(mut self, ratio: f32) -> Self {
        self.min_width_ratio = ratio;
        self
    }

    /// Usable column range for a strip of `width` columns.
    pub fn window_columns(&self, width: usize) -> std::ops::Range<usize> {
        let start = (self.window_start * width as f32).floor() as usize;
        let end = (self.window_end * width as f32).ceil() as usize;
        start.min(width)..end.min(width)
    }

    pub(crate) fn validate(&self) -> Result<(), InputError> {
        if !(0.0..1.0).contains(&self.window_start)
            || self.window_end <= self.window_start
            || self.window_end > 1.0
        {
            return Err(InputError::InvalidOption("span window"));
        }
        if !(0.0..1.0).contains(&self.min_width_ratio) {
            return Err(InputError::InvalidOption("span min_width_ratio"));
        }
        Ok(())
    }
}

/// Measure the fill of `band` in `ink`.
///
/// # Example
///
/// ```
/// use riskbar_engine::{extract_span, Band, ColorMask, InkGate, PixelRegion, SpanOptions};
///
/// // 10x2 strip, left 6 columns red
/// let mut data = Vec::new();
/// for _ in 0..2 {
///     for x in 0..10 {
///         data.extend_from_slice(&if x < 6 { [230u8, 20, 20] } else { [255, 255, 255] });
///     }
/// }
/// let region = PixelRegion::new(&data, 10, 2).unwrap();
/// let ink = ColorMask::ink(&region, &InkGate::default());
///
/// let span = extract_span(&ink, Band::new(0, 2), &SpanOptions::new());
/// assert_eq!(span.range.unwrap().last, 5);
/// assert!((span.width_ratio - 0.5).abs() < 1e-6);
/// ```
pub fn extract_span(ink: &ColorMask, band: Band, options: &SpanOptions) -> FillSpan {
    let window = options.window_columns(ink.width());
    let usable = window.len();
    if usable == 0 {
        return FillSpan::EMPTY;
    }

    let filled = ink.columns_any(band.top..band.bottom, window.clone());
    let first = filled.iter().position(|&f| f);
    let last = filled.iter().rposition(|&f| f);
    let (first, last) = match (first, last) {
        (Some(first), Some(last)) => (first, last),
        _ => return FillSpan::EMPTY,
    };

    let width_ratio = ((last - first) as f32 / usable as f32).clamp(0.0, 1.0);
    if width_ratio < options.min_width_ratio {
        return FillSpan::EMPTY;
    }

    FillSpan {
        range: Some(ColumnRange {
            first: window.start + first,
            last: window.start + last,
        }),
        width_ratio,
    }
}
