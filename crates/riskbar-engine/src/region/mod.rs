//! Borrowed views over a page's pixels.
//!
//! The caller owns the decoded raster; the engine only ever reads it
//! through a [`PixelRegion`]. Cropping produces another view over the same
//! buffer, so no pixel is copied or mutated.

use crate::color::Rgb8;
use crate::error::InputError;

/// A rectangle in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Rect {
    #[inline]
    pub const fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Immutable view of a rectangular area of an RGB page.
///
/// The backing buffer is row-major, three bytes per pixel, with no row
/// padding. Coordinates passed to [`pixel()`](Self::pixel) are relative to
/// the view, not to the backing buffer.
///
/// # Example
///
/// ```
/// use riskbar_engine::{PixelRegion, Rect, Rgb8};
///
/// let data = vec![255u8; 4 * 2 * 3];
/// let page = PixelRegion::new(&data, 4, 2).unwrap();
/// let right = page.sub_region(Rect::new(2, 0, 2, 2)).unwrap();
///
/// assert_eq!(right.width(), 2);
/// assert_eq!(right.pixel(0, 0), Rgb8::WHITE);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PixelRegion<'a> {
    data: &'a [u8],
    /// Width of the backing buffer in pixels
    stride: usize,
    origin_x: usize,
    origin_y: usize,
    width: usize,
    height: usize,
}

impl<'a> PixelRegion<'a> {
    /// Wrap a full RGB buffer of `width * height` pixels.
    ///
    /// Fails on zero-area regions and on buffers whose length does not
    /// match the dimensions.
    pub fn new(data: &'a [u8], width: usize, height: usize) -> Result<Self, InputError> {
        if width == 0 || height == 0 {
            return Err(InputError::EmptyRegion);
        }
        let expected = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(3))
            .ok_or(InputError::InvalidOption("region dimensions overflow"))?;
        if data.len() != expected {
            return Err(InputError::BufferSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            stride: width,
            origin_x: 0,
            origin_y: 0,
            width,
            height,
        })
    }

    /// Width of this view in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height of this view in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Read the pixel at `(x, y)` relative to this view.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` lies outside the view.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Rgb8 {
        assert!(
            x < self.width && y < self.height,
            "pixel ({}, {}) outside {}x{} region",
            x,
            y,
            self.width,
            self.height
        );
        let offset = ((self.origin_y + y) * self.stride + self.origin_x + x) * 3;
        Rgb8::new(
            self.data[offset],
            self.data[offset + 1],
            self.data[offset + 2],
        )
    }

    /// Narrow the view to `rect`, given relative to this view.
    pub fn sub_region(&self, rect: Rect) -> Result<PixelRegion<'a>, InputError> {
        let fits = rect.width > 0
            && rect.height > 0
            && rect.x.checked_add(rect.width).is_some_and(|r| r <= self.width)
            && rect.y.checked_add(rect.height).is_some_and(|b| b <= self.height);
        if !fits {
            return Err(InputError::CropOutOfBounds {
                crop: (rect.x, rect.y, rect.width, rect.height),
                region: (self.width, self.height),
            });
        }
        Ok(PixelRegion {
            data: self.data,
            stride: self.stride,
            origin_x: self.origin_x + rect.x,
            origin_y: self.origin_y + rect.y,
            width: rect.width,
            height: rect.height,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: usize, height: usize) -> Vec<u8> {
        let mut data = Vec::with_capacity(width * height * 3);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&[x as u8, y as u8, 7]);
            }
        }
        data
    }

    #[test]
    fn test_rejects_empty_region() {
        assert_eq!(
            PixelRegion::new(&[], 0, 10).unwrap_err(),
            InputError::EmptyRegion
        );
        assert_eq!(
            PixelRegion::new(&[], 10, 0).unwrap_err(),
            InputError::EmptyRegion
        );
    }

    #[test]
    fn test_rejects_inconsistent_buffer() {
        let data = vec![0u8; 11];
        assert_eq!(
            PixelRegion::new(&data, 2, 2).unwrap_err(),
            InputError::BufferSize {
                expected: 12,
                actual: 11
            }
        );
    }

    #[test]
    fn test_pixel_addressing() {
        let data = gradient(5, 4);
        let region = PixelRegion::new(&data, 5, 4).unwrap();
        assert_eq!(region.pixel(3, 2), Rgb8::new(3, 2, 7));
    }

    #[test]
    fn test_nested_sub_region_offsets_accumulate() {
        let data = gradient(10, 8);
        let region = PixelRegion::new(&data, 10, 8).unwrap();
        let inner = region
            .sub_region(Rect::new(2, 1, 6, 6))
            .unwrap()
            .sub_region(Rect::new(1, 2, 3, 3))
            .unwrap();
        assert_eq!(inner.width(), 3);
        assert_eq!(inner.pixel(0, 0), Rgb8::new(3, 3, 7));
        assert_eq!(inner.pixel(2, 2), Rgb8::new(5, 5, 7));
    }

    #[test]
    fn test_sub_region_out_of_bounds() {
        let data = gradient(10, 8);
        let region = PixelRegion::new(&data, 10, 8).unwrap();
        assert!(matches!(
            region.sub_region(Rect::new(5, 0, 6, 2)),
            Err(InputError::CropOutOfBounds { .. })
        ));
        assert!(region.sub_region(Rect::new(0, 0, 0, 2)).is_err());
        assert!(region.sub_region(Rect::new(0, 0, 10, 8)).is_ok());
    }

    #[test]
    #[should_panic]
    fn test_pixel_outside_view_panics() {
        let data = gradient(4, 4);
        let region = PixelRegion::new(&data, 4, 4).unwrap();
        let inner = region.sub_region(Rect::new(0, 0, 2, 2)).unwrap();
        inner.pixel(2, 0);
    }
}
