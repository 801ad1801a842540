//! Pixel color types.
//!
//! Report pages arrive as 8-bit RGB. Everything the engine decides about a
//! pixel (is it ink, is it paper, which risk hue is it) is decided in HSV,
//! because HSV separates "which color" from "how washed out".
//!
//! # Example
//!
//! ```
//! use riskbar_engine::{Hsv, Rgb8};
//!
//! let hsv = Hsv::from(Rgb8::new(255, 0, 0));
//! assert_eq!(hsv.h, 0.0);
//! assert_eq!(hsv.s, 1.0);
//! assert_eq!(hsv.v, 1.0);
//! ```

mod hsv;
mod rgb;

pub use hsv::Hsv;
pub(crate) use hsv::{hue_offset, wrap_degrees};
pub use rgb::Rgb8;
