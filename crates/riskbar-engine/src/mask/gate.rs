//! Per-pixel gates deciding mask membership.

use crate::color::Hsv;
use crate::error::InputError;

/// A closed interval of hue angles in degrees.
///
/// When `start > end` the range wraps through 0°, so `340..=20` covers
/// both the magenta-red and orange-red ends of the circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HueRange {
    pub start: f32,
    pub end: f32,
}

impl HueRange {
    /// Reds on both sides of 0°.
    pub const RED: HueRange = HueRange::new(340.0, 20.0);
    /// Oranges.
    pub const ORANGE: HueRange = HueRange::new(20.0, 45.0);
    /// Yellows, stopping before yellow-green.
    pub const YELLOW: HueRange = HueRange::new(45.0, 70.0);

    #[inline]
    pub const fn new(start: f32, end: f32) -> Self {
        Self { start, end }
    }

    /// True when `hue` lies inside the range, endpoints included.
    #[inline]
    pub fn contains(&self, hue: f32) -> bool {
        if self.start <= self.end {
            hue >= self.start && hue <= self.end
        } else {
            hue >= self.start || hue <= self.end
        }
    }

    pub(crate) fn validate(&self) -> Result<(), InputError> {
        let in_circle = |d: f32| (0.0..=360.0).contains(&d);
        if in_circle(self.start) && in_circle(self.end) {
            Ok(())
        } else {
            Err(InputError::InvalidOption("hue range outside 0..=360 degrees"))
        }
    }
}

/// Decides whether a pixel is colored "ink".
///
/// A pixel is ink iff `s > saturation_threshold` and `v > value_threshold`
/// and, when `hue_ranges` is non-empty, its hue falls in one of them.
#[derive(Debug, Clone, PartialEq)]
pub struct InkGate {
    pub saturation_threshold: f32,
    pub value_threshold: f32,
    pub hue_ranges: Vec<HueRange>,
}

impl Default for InkGate {
    /// Saturation above 50/255 (the historical 8-bit cutoff for the gray
    /// track) and value above 0.2 (black borders and text).
    fn default() -> Self {
        Self {
            saturation_threshold: 50.0 / 255.0,
            value_threshold: 0.2,
            hue_ranges: Vec::new(),
        }
    }
}

impl InkGate {
    /// Default thresholds restricted to red, orange and yellow hues.
    pub fn warm() -> Self {
        Self {
            hue_ranges: vec![HueRange::RED, HueRange::ORANGE, HueRange::YELLOW],
            ..Self::default()
        }
    }

    #[inline]
    pub fn is_ink(&self, hsv: &Hsv) -> bool {
        hsv.s > self.saturation_threshold
            && hsv.v > self.value_threshold
            && (self.hue_ranges.is_empty() || self.hue_ranges.iter().any(|r| r.contains(hsv.h)))
    }

    pub(crate) fn validate(&self) -> Result<(), InputError> {
        if !(0.0..=1.0).contains(&self.saturation_threshold) {
            return Err(InputError::InvalidOption("ink saturation_threshold"));
        }
        if !(0.0..=1.0).contains(&self.value_threshold) {
            return Err(InputError::InvalidOption("ink value_threshold"));
        }
        self.hue_ranges.iter().try_for_each(HueRange::validate)
    }
}

/// Decides whether a pixel is bare paper.
///
/// Paper is bright and nearly colorless: `v >= value_floor` and
/// `s <= saturation_ceiling`. Everything else, including gray bar tracks,
/// black rules and colored fill, is structure. The default floor sits
/// above the palest track gray in use (245/255) and below rendered paper.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackgroundGate {
    pub value_floor: f32,
    pub saturation_ceiling: f32,
}

impl Default for BackgroundGate {
    fn default() -> Self {
        Self {
            value_floor: 0.97,
            saturation_ceiling: 0.1,
        }
    }
}

impl BackgroundGate {
    #[inline]
    pub fn is_background(&self, hsv: &Hsv) -> bool {
        hsv.v >= self.value_floor && hsv.s <= self.saturation_ceiling
    }

    pub(crate) fn validate(&self) -> Result<(), InputError> {
        if !(0.0..=1.0).contains(&self.value_floor) {
            return Err(InputError::InvalidOption("background value_floor"));
        }
        if !(0.0..=1.0).contains(&self.saturation_ceiling) {
            return Err(InputError::InvalidOption("background saturation_ceiling"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb8;

    fn hsv(r: u8, g: u8, b: u8) -> Hsv {
        Hsv::from(Rgb8::new(r, g, b))
    }

    #[test]
    fn test_hue_range_plain_and_wrapping() {
        let plain = HueRange::new(20.0, 50.0);
        assert!(plain.contains(20.0));
        assert!(plain.contains(50.0));
        assert!(!plain.contains(50.5));

        assert!(HueRange::RED.contains(355.0));
        assert!(HueRange::RED.contains(0.0));
        assert!(HueRange::RED.contains(20.0));
        assert!(!HueRange::RED.contains(180.0));
    }

    #[test]
    fn test_ink_gate_rejects_gray_white_black() {
        let gate = InkGate::default();
        assert!(!gate.is_ink(&hsv(255, 255, 255)));
        assert!(!gate.is_ink(&hsv(200, 200, 200)));
        assert!(!gate.is_ink(&hsv(0, 0, 0)));
        // Dark but saturated: below the value threshold
        assert!(!gate.is_ink(&hsv(40, 0, 0)));
        assert!(gate.is_ink(&hsv(230, 30, 30)));
        assert!(gate.is_ink(&hsv(30, 90, 220)));
    }

    #[test]
    fn test_warm_gate_drops_cool_hues() {
        let gate = InkGate::warm();
        assert!(gate.is_ink(&hsv(255, 0, 0)));
        assert!(gate.is_ink(&hsv(255, 160, 0)));
        assert!(gate.is_ink(&hsv(250, 220, 0)));
        assert!(!gate.is_ink(&hsv(0, 0, 255)));
        assert!(!gate.is_ink(&hsv(0, 200, 0)));
    }

    #[test]
    fn test_background_gate() {
        let gate = BackgroundGate::default();
        assert!(gate.is_background(&hsv(255, 255, 255)));
        assert!(gate.is_background(&hsv(250, 250, 248)));
        assert!(!gate.is_background(&hsv(245, 245, 245)));
        assert!(!gate.is_background(&hsv(235, 235, 235)));
        assert!(!gate.is_background(&hsv(210, 210, 210)));
        assert!(!gate.is_background(&hsv(255, 255, 0)));
        assert!(!gate.is_background(&hsv(0, 0, 0)));
    }

    #[test]
    fn test_validation() {
        assert!(InkGate::default().validate().is_ok());
        let bad = InkGate {
            saturation_threshold: 1.5,
            ..InkGate::default()
        };
        assert!(bad.validate().is_err());

        let bad_range = InkGate {
            hue_ranges: vec![HueRange::new(-5.0, 10.0)],
            ..InkGate::default()
        };
        assert!(bad_range.validate().is_err());
    }
}
