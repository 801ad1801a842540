//! PNG decoding into the RGB buffers the engine reads.

use png::{ColorType, Decoder, Limits, Transformations, Unit};
use riskbar_engine::{InputError, PixelRegion};
use sha2::{Digest, Sha256};
use thiserror::Error;

const INCH_PER_METER: f32 = 0.0254;

/// Decoded buffer limit, independent of the upload size limit. A tiny
/// compressed PNG can still claim enormous dimensions.
const MAX_DECODED_BYTES: usize = 512 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum RasterError {
    #[error("Empty upload")]
    Empty,

    #[error("Upload too large: {size} bytes (max {max})")]
    TooLarge { size: usize, max: usize },

    #[error("PNG decode error: {0}")]
    Decode(#[from] png::DecodingError),

    #[error("Unsupported PNG color type: {0:?}")]
    UnsupportedColor(ColorType),
}

/// One decoded page.
#[derive(Debug, Clone)]
pub struct RasterPage {
    pub width: usize,
    pub height: usize,
    /// Row-major RGB, 3 bytes per pixel
    pub rgb: Vec<u8>,
    /// Resolution from the `pHYs` chunk, if it is given in pixels per metre
    pub dpi: Option<f32>,
    /// SHA-256 of the encoded upload, hex
    pub sha256: String,
}

impl RasterPage {
    pub fn region(&self) -> Result<PixelRegion<'_>, InputError> {
        PixelRegion::new(&self.rgb, self.width, self.height)
    }
}

/// Decode a PNG upload into 8-bit RGB.
///
/// Palette and sub-byte images are expanded, 16-bit channels are stripped,
/// gray is replicated across channels and alpha is dropped.
pub fn decode_png(bytes: &[u8], max_bytes: usize) -> Result<RasterPage, RasterError> {
    if bytes.is_empty() {
        return Err(RasterError::Empty);
    }
    if bytes.len() > max_bytes {
        return Err(RasterError::TooLarge {
            size: bytes.len(),
            max: max_bytes,
        });
    }

    let mut decoder = Decoder::new_with_limits(
        bytes,
        Limits {
            bytes: MAX_DECODED_BYTES,
        },
    );
    decoder.set_transformations(Transformations::EXPAND | Transformations::STRIP_16);
    let mut reader = decoder.read_info()?;

    let dpi = reader
        .info()
        .pixel_dims
        .filter(|dims| dims.unit == Unit::Meter)
        .map(|dims| dims.xppu as f32 * INCH_PER_METER);

    let mut buf = vec![0; reader.output_buffer_size()];
    let frame = reader.next_frame(&mut buf)?;

    let channels = match frame.color_type {
        ColorType::Grayscale => 1,
        ColorType::GrayscaleAlpha => 2,
        ColorType::Rgb => 3,
        ColorType::Rgba => 4,
        other => return Err(RasterError::UnsupportedColor(other)),
    };

    let width = frame.width as usize;
    let height = frame.height as usize;
    let mut rgb = Vec::with_capacity(width * height * 3);
    for row in buf.chunks(frame.line_size).take(height) {
        for px in row[..width * channels].chunks_exact(channels) {
            match channels {
                1 | 2 => rgb.extend_from_slice(&[px[0], px[0], px[0]]),
                _ => rgb.extend_from_slice(&px[..3]),
            }
        }
    }

    tracing::debug!(
        width,
        height,
        ?dpi,
        color = ?frame.color_type,
        "Decoded PNG"
    );

    Ok(RasterPage {
        width,
        height,
        rgb,
        dpi,
        sha256: hex::encode(Sha256::digest(bytes)),
    })
}
