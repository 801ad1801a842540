//! Error types for the extraction engine.
//!
//! [`InputError`] covers everything wrong with the caller's input (buffer,
//! crop, labels, options). [`ExtractError`] adds the one failure that is
//! about the page itself: a detected band count that disagrees with the
//! expected label count.

use std::fmt;

/// Invalid input handed to the engine. Never retried; the caller should
/// surface it as a client error.
#[derive(Debug, Clone, PartialEq)]
pub enum InputError {
    /// Region has zero width or zero height
    EmptyRegion,
    /// Pixel buffer length does not match `width * height * 3`
    BufferSize {
        /// Expected number of bytes
        expected: usize,
        /// Actual number of bytes
        actual: usize,
    },
    /// Crop rectangle extends past the region
    CropOutOfBounds {
        /// Requested crop as (x, y, width, height)
        crop: (usize, usize, usize, usize),
        /// Region size as (width, height)
        region: (usize, usize),
    },
    /// No expected labels were given for a page
    NoLabels,
    /// The same label appears twice in the expected label list
    DuplicateLabel(String),
    /// An option is outside its allowed range
    InvalidOption(&'static str),
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::EmptyRegion => write!(f, "pixel region is empty"),
            InputError::BufferSize { expected, actual } => write!(
                f,
                "pixel buffer has {} bytes, expected {} (width * height * 3)",
                actual, expected
            ),
            InputError::CropOutOfBounds { crop, region } => write!(
                f,
                "crop {}x{} at ({}, {}) exceeds region {}x{}",
                crop.2, crop.3, crop.0, crop.1, region.0, region.1
            ),
            InputError::NoLabels => write!(f, "no expected labels given"),
            InputError::DuplicateLabel(label) => write!(f, "duplicate label: {}", label),
            InputError::InvalidOption(name) => write!(f, "invalid option: {}", name),
        }
    }
}

impl std::error::Error for InputError {}

/// Failure while extracting one page.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractError {
    /// The input itself is unusable
    Input(InputError),
    /// Detected band count differs from the expected label count
    GeometryMismatch {
        /// Zero-based page index
        page: usize,
        /// Number of labels the page layout expects
        expected: usize,
        /// Number of bands the segmenter found
        detected: usize,
    },
}

impl ExtractError {
    /// True for failures caused by the caller's input rather than the page.
    pub fn is_input_error(&self) -> bool {
        matches!(self, ExtractError::Input(_))
    }
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractError::Input(err) => write!(f, "input error: {}", err),
            ExtractError::GeometryMismatch {
                expected, detected, ..
            } => write!(
                f,
                "geometry mismatch: expected {} bands, detected {}",
                expected, detected
            ),
        }
    }
}

impl std::error::Error for ExtractError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExtractError::Input(err) => Some(err),
            ExtractError::GeometryMismatch { .. } => None,
        }
    }
}

impl From<InputError> for ExtractError {
    fn from(err: InputError) -> Self {
        ExtractError::Input(err)
    }
}
