//! Central tendency of a fill's colors.
//!
//! Hue is an angle, so averaging 355° and 5° must give 0°, not 180°.
//! Both tendencies work relative to the circular mean of the samples.

use crate::color::{hue_offset, wrap_degrees, Hsv};
use crate::mask::ColorMask;
use crate::region::PixelRegion;
use crate::segment::Band;
use crate::span::ColumnRange;

/// Representative color of a bar's fill.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HueMeasurement {
    /// Hue in degrees, `0.0..360.0`
    pub hue: f32,
    pub saturation: f32,
    pub value: f32,
    /// Number of pixels measured
    pub samples: usize,
}

/// How samples are reduced to one representative value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tendency {
    /// Lower median. Resists blended anti-aliased edge pixels and always
    /// returns a value that occurs in the samples.
    #[default]
    Median,
    /// Arithmetic mean (circular for hue).
    Mean,
}

impl Tendency {
    /// Reduce `samples`; `None` when there are none.
    pub fn measure(self, samples: &[Hsv]) -> Option<HueMeasurement> {
        if samples.is_empty() {
            return None;
        }
        let reference = circular_mean(samples);

        let (hue, saturation, value) = match self {
            Tendency::Median => {
                let mut hues: Vec<(f32, f32)> = samples
                    .iter()
                    .map(|s| (hue_offset(reference, s.h), s.h))
                    .collect();
                hues.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1)));
                let hue = hues[lower_median_index(hues.len())].1;
                (
                    hue,
                    lower_median(samples.iter().map(|s| s.s).collect()),
                    lower_median(samples.iter().map(|s| s.v).collect()),
                )
            }
            Tendency::Mean => {
                let n = samples.len() as f32;
                (
                    reference,
                    samples.iter().map(|s| s.s).sum::<f32>() / n,
                    samples.iter().map(|s| s.v).sum::<f32>() / n,
                )
            }
        };

        Some(HueMeasurement {
            hue,
            saturation,
            value,
            samples: samples.len(),
        })
    }
}

/// HSV values of the masked pixels of `band` between the span's columns.
pub fn fill_samples(
    region: &PixelRegion<'_>,
    ink: &ColorMask,
    band: Band,
    range: ColumnRange,
) -> Vec<Hsv> {
    let bottom = band.bottom.min(region.height());
    let last = range.last.min(region.width().saturating_sub(1));
    let mut samples = Vec::new();
    for y in band.top..bottom {
        for x in range.first..=last {
            if ink.get(x, y) {
                samples.push(Hsv::from(region.pixel(x, y)));
            }
        }
    }
    samples
}

fn circular_mean(samples: &[Hsv]) -> f32 {
    let (sin, cos) = samples.iter().fold((0.0f64, 0.0f64), |(sin, cos), s| {
        let rad = (s.h as f64).to_radians();
        (sin + rad.sin(), cos + rad.cos())
    });
    wrap_degrees(sin.atan2(cos).to_degrees() as f32)
}

#[inline]
fn lower_median_index(len: usize) -> usize {
    (len - 1) / 2
}

fn lower_median(mut values: Vec<f32>) -> f32 {
    values.sort_by(f32::total_cmp);
    values[lower_median_index(values.len())]
}
