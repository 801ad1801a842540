//! Boolean pixel masks and their projections.

use std::ops::Range;

use super::gate::{BackgroundGate, InkGate};
use crate::color::Hsv;
use crate::region::PixelRegion;

/// Projection direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// One value per row: fraction of the row's columns that are set.
    Rows,
    /// One value per column: fraction of the column's rows that are set.
    Columns,
}

/// A boolean matrix with the same dimensions as the region it came from.
///
/// `get(x, y)` is true iff the source pixel at `(x, y)` passed the gate the
/// mask was built with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorMask {
    /// Row-major membership flags.
    bits: Vec<bool>,
    width: usize,
    height: usize,
}

impl ColorMask {
    /// Build a mask from an arbitrary per-pixel predicate.
    pub fn from_fn<F>(region: &PixelRegion<'_>, mut predicate: F) -> Self
    where
        F: FnMut(&Hsv) -> bool,
    {
        let (width, height) = (region.width(), region.height());
        let mut bits = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                bits.push(predicate(&Hsv::from(region.pixel(x, y))));
            }
        }
        Self {
            bits,
            width,
            height,
        }
    }

    /// Mark colored fill pixels.
    pub fn ink(region: &PixelRegion<'_>, gate: &InkGate) -> Self {
        Self::from_fn(region, |hsv| gate.is_ink(hsv))
    }

    /// Mark every pixel that is not bare paper.
    pub fn structure(region: &PixelRegion<'_>, gate: &BackgroundGate) -> Self {
        Self::from_fn(region, |hsv| !gate.is_background(hsv))
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Membership of the pixel at `(x, y)`.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.bits[y * self.width + x]
    }

    /// Number of set pixels.
    pub fn count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// Density projection along `axis`, each value in `0.0..=1.0`.
    pub fn profile(&self, axis: Axis) -> Vec<f32> {
        match axis {
            Axis::Rows => (0..self.height)
                .map(|y| {
                    let row = &self.bits[y * self.width..(y + 1) * self.width];
                    row.iter().filter(|&&b| b).count() as f32 / self.width as f32
                })
                .collect(),
            Axis::Columns => (0..self.width)
                .map(|x| {
                    let set = (0..self.height).filter(|&y| self.get(x, y)).count();
                    set as f32 / self.height as f32
                })
                .collect(),
        }
    }

    /// For each column in `cols`, whether any row in `rows` is set.
    ///
    /// The returned vector is indexed relative to `cols.start`.
    pub fn columns_any(&self, rows: Range<usize>, cols: Range<usize>) -> Vec<bool> {
        let rows = rows.start.min(self.height)..rows.end.min(self.height);
        let cols = cols.start.min(self.width)..cols.end.min(self.width);
        cols.map(|x| rows.clone().any(|y| self.get(x, y))).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb8;

    /// 6x4 white region with a red block at x=1..4, y=1..3.
    fn sample() -> Vec<u8> {
        let mut data = Vec::new();
        for y in 0..4 {
            for x in 0..6 {
                let px = if (1..4).contains(&x) && (1..3).contains(&y) {
                    Rgb8::new(220, 20, 20)
                } else {
                    Rgb8::WHITE
                };
                data.extend_from_slice(&px.to_bytes());
            }
        }
        data
    }

    #[test]
    fn test_ink_mask_marks_block() {
        let data = sample();
        let region = PixelRegion::new(&data, 6, 4).unwrap();
        let mask = ColorMask::ink(&region, &InkGate::default());

        assert_eq!(mask.width(), 6);
        assert_eq!(mask.height(), 4);
        assert_eq!(mask.count(), 6);
        assert!(mask.get(1, 1));
        assert!(!mask.get(0, 1));
        assert!(!mask.get(1, 3));
    }

    #[test]
    fn test_profiles() {
        let data = sample();
        let region = PixelRegion::new(&data, 6, 4).unwrap();
        let mask = ColorMask::ink(&region, &InkGate::default());

        assert_eq!(mask.profile(Axis::Rows), vec![0.0, 0.5, 0.5, 0.0]);
        assert_eq!(
            mask.profile(Axis::Columns),
            vec![0.0, 0.5, 0.5, 0.5, 0.0, 0.0]
        );
    }

    #[test]
    fn test_columns_any_is_window_relative() {
        let data = sample();
        let region = PixelRegion::new(&data, 6, 4).unwrap();
        let mask = ColorMask::ink(&region, &InkGate::default());

        assert_eq!(mask.columns_any(0..4, 2..6), vec![true, true, false, false]);
        assert_eq!(mask.columns_any(3..4, 0..6), vec![false; 6]);
        // Out-of-range bounds are clipped
        assert_eq!(mask.columns_any(0..99, 5..99), vec![false]);
    }

    #[test]
    fn test_structure_mask_keeps_gray() {
        let mut data = Vec::new();
        for x in 0..4 {
            let px = if x < 2 {
                Rgb8::new(190, 190, 190)
            } else {
                Rgb8::WHITE
            };
            data.extend_from_slice(&px.to_bytes());
        }
        let region = PixelRegion::new(&data, 4, 1).unwrap();
        let mask = ColorMask::structure(&region, &BackgroundGate::default());
        assert_eq!(mask.profile(Axis::Columns), vec![1.0, 1.0, 0.0, 0.0]);
    }
}
