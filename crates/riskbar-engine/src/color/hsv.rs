//! Hue/saturation/value color type.
//!
//! Conversion uses the standard max/min/delta formula. Channel differences
//! are kept as integers until the final division, so a hue that sits
//! exactly on a rule boundary (20°, 25°, ...) converts to exactly that
//! value instead of drifting by one ulp.

use super::rgb::Rgb8;

/// A color in HSV space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsv {
    /// Hue angle in degrees, `0.0..360.0`. Zero for achromatic pixels.
    pub h: f32,
    /// Saturation, `0.0..=1.0`.
    pub s: f32,
    /// Value (brightness), `0.0..=1.0`.
    pub v: f32,
}

impl Hsv {
    /// Create an HSV color. The hue is wrapped into `0.0..360.0`.
    #[inline]
    pub fn new(h: f32, s: f32, v: f32) -> Self {
        Self {
            h: wrap_degrees(h),
            s,
            v,
        }
    }

    /// True when the pixel carries no hue information (gray, white, black).
    #[inline]
    pub fn is_achromatic(&self) -> bool {
        self.s == 0.0
    }
}

impl From<Rgb8> for Hsv {
    fn from(px: Rgb8) -> Self {
        let max = px.max_channel() as i32;
        let min = px.min_channel() as i32;
        let delta = max - min;

        let v = max as f32 / 255.0;
        let s = if max == 0 {
            0.0
        } else {
            delta as f32 / max as f32
        };

        if delta == 0 {
            return Self { h: 0.0, s, v };
        }

        let (r, g, b) = (px.r as i32, px.g as i32, px.b as i32);
        let (sector, numerator) = if max == r {
            (0, g - b)
        } else if max == g {
            (120, b - r)
        } else {
            (240, r - g)
        };

        let h = sector as f32 + 60.0 * numerator as f32 / delta as f32;
        Self {
            h: wrap_degrees(h),
            s,
            v,
        }
    }
}

/// Wrap an angle in degrees into `0.0..360.0`.
#[inline]
pub(crate) fn wrap_degrees(h: f32) -> f32 {
    let wrapped = h.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Signed shortest angular offset from `from` to `to`, in `(-180, 180]`.
#[inline]
pub(crate) fn hue_offset(from: f32, to: f32) -> f32 {
    let d = (to - from).rem_euclid(360.0);
    if d > 180.0 {
        d - 360.0
    } else {
        d
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primaries() {
        let red = Hsv::from(Rgb8::new(255, 0, 0));
        assert_eq!((red.h, red.s, red.v), (0.0, 1.0, 1.0));

        let green = Hsv::from(Rgb8::new(0, 255, 0));
        assert_eq!(green.h, 120.0);

        let blue = Hsv::from(Rgb8::new(0, 0, 255));
        assert_eq!(blue.h, 240.0);

        let yellow = Hsv::from(Rgb8::new(255, 255, 0));
        assert_eq!(yellow.h, 60.0);
    }

    #[test]
    fn test_magenta_side_wraps_below_360() {
        // r is max, b > g: negative numerator wraps into the 300s
        let hsv = Hsv::from(Rgb8::new(255, 0, 64));
        assert!(hsv.h > 340.0 && hsv.h < 360.0, "hue {}", hsv.h);
    }

    #[test]
    fn test_exact_boundary_hues() {
        assert_eq!(Hsv::from(Rgb8::new(255, 85, 0)).h, 20.0);
        assert_eq!(Hsv::from(Rgb8::new(240, 100, 0)).h, 25.0);
    }

    #[test]
    fn test_gray_and_black_are_achromatic() {
        let gray = Hsv::from(Rgb8::new(128, 128, 128));
        assert!(gray.is_achromatic());
        assert_eq!(gray.h, 0.0);
        assert!((gray.v - 128.0 / 255.0).abs() < 1e-6);

        let black = Hsv::from(Rgb8::new(0, 0, 0));
        assert_eq!((black.h, black.s, black.v), (0.0, 0.0, 0.0));
    }

    #[test]
    fn test_wrap_degrees() {
        assert_eq!(wrap_degrees(360.0), 0.0);
        assert_eq!(wrap_degrees(-10.0), 350.0);
        assert_eq!(wrap_degrees(725.0), 5.0);
    }

    #[test]
    fn test_hue_offset_takes_short_way() {
        assert_eq!(hue_offset(350.0, 10.0), 20.0);
        assert_eq!(hue_offset(10.0, 350.0), -20.0);
        assert_eq!(hue_offset(0.0, 180.0), 180.0);
    }

    #[test]
    fn test_hsv_matches_palette_crate() {
        use palette::{Hsv as PaletteHsv, IntoColor, Srgb as PaletteSrgb};

        let samples = [
            (255u8, 0u8, 0u8),
            (255, 128, 0),
            (255, 220, 0),
            (30, 160, 60),
            (20, 60, 200),
            (200, 30, 120),
            (128, 128, 128),
            (90, 45, 10),
        ];

        for (r, g, b) in samples {
            let ours = Hsv::from(Rgb8::new(r, g, b));
            let srgb = PaletteSrgb::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0);
            let theirs: PaletteHsv = srgb.into_color();

            assert!(
                (ours.s - theirs.saturation).abs() < 1e-4,
                "saturation mismatch for ({r}, {g}, {b}): ours={}, palette={}",
                ours.s,
                theirs.saturation
            );
            assert!(
                (ours.v - theirs.value).abs() < 1e-4,
                "value mismatch for ({r}, {g}, {b}): ours={}, palette={}",
                ours.v,
                theirs.value
            );
            if ours.s > 0.0 {
                let their_h = theirs.hue.into_positive_degrees();
                assert!(
                    hue_offset(ours.h, their_h).abs() < 1e-2,
                    "hue mismatch for ({r}, {g}, {b}): ours={}, palette={}",
                    ours.h,
                    their_h
                );
            }
        }
    }
}
