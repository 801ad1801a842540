//! 8-bit RGB pixel type.

/// One pixel of a rasterized page, 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb8 {
    /// Red channel (0..=255)
    pub r: u8,
    /// Green channel (0..=255)
    pub g: u8,
    /// Blue channel (0..=255)
    pub b: u8,
}

impl Rgb8 {
    /// Pure white, the paper color of a clean page.
    pub const WHITE: Rgb8 = Rgb8::new(255, 255, 255);

    /// Create a pixel from its channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a pixel from a byte triple `[R, G, B]`.
    ///
    /// # Example
    /// ```
    /// use riskbar_engine::Rgb8;
    /// let px = Rgb8::from_bytes([10, 20, 30]);
    /// assert_eq!(px.g, 20);
    /// ```
    #[inline]
    pub const fn from_bytes(bytes: [u8; 3]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2])
    }

    /// Convert to a byte triple `[R, G, B]`.
    #[inline]
    pub const fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    #[inline]
    pub(crate) fn max_channel(self) -> u8 {
        self.r.max(self.g).max(self.b)
    }

    #[inline]
    pub(crate) fn min_channel(self) -> u8 {
        self.r.min(self.g).min(self.b)
    }
}

impl From<[u8; 3]> for Rgb8 {
    #[inline]
    fn from(bytes: [u8; 3]) -> Self {
        Self::from_bytes(bytes)
    }
}
