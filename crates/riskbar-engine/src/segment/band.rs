//! Row interval type.

/// A half-open interval `[top, bottom)` of rows holding one bar.
///
/// Bands produced by the segmenter never overlap and are sorted by `top`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Band {
    pub top: usize,
    pub bottom: usize,
}

impl Band {
    /// Create a band.
    ///
    /// # Panics (debug only)
    ///
    /// Debug-asserts that `top < bottom`.
    #[inline]
    pub fn new(top: usize, bottom: usize) -> Self {
        debug_assert!(top < bottom, "band top ({}) must be above bottom ({})", top, bottom);
        Self { top, bottom }
    }

    /// Number of rows in the band.
    #[inline]
    pub fn height(&self) -> usize {
        self.bottom - self.top
    }

    /// Row at the vertical middle of the band.
    #[inline]
    pub fn center(&self) -> usize {
        self.top + self.height() / 2
    }
}
