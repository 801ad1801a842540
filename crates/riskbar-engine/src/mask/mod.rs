//! Color mask building.
//!
//! Two masks are built from every cropped page region:
//!
//! - the **structure** mask marks everything that is not paper. Bar
//!   tracks are gray, so a bar with no colored fill still shows up here
//!   and the segmenter can count it.
//! - the **ink** mask marks saturated, reasonably bright pixels: the
//!   colored fill of a risk bar. Gray tracks, white paper and black text
//!   are rejected by construction.

mod color_mask;
mod gate;

pub use color_mask::{Axis, ColorMask};
pub use gate::{BackgroundGate, HueRange, InkGate};
