//! Band segmentation.
//!
//! A page region holds a vertical stack of bars. The segmenter projects a
//! mask onto one axis, marks the positions whose density clears a
//! threshold, bridges small gaps left by anti-aliased edges and drops runs
//! too short to be a bar. The result is the list of [`Band`]s in reading
//! order.

mod band;
mod segmenter;

pub use band::Band;
pub use segmenter::{segment_axis, segment_profile, BandSegmenter, SegmentOptions};
