//! riskbar-engine: deterministic extraction of colored risk bars
//!
//! Fixed-layout clinical reports show one horizontal bar per condition.
//! The bar's color encodes the risk category and its filled length the
//! progression. This crate reads those bars from a rasterized page: it
//! finds an a-priori unknown number of bands, measures each band's colored
//! fill and classifies its color into a discrete [`RiskLevel`].
//!
//! The engine is a pure function of one page image and one configuration.
//! It performs no I/O, keeps no state between calls and never mutates the
//! caller's pixels.
//!
//! # Quick Start
//!
//! ```
//! use riskbar_engine::{PixelRegion, RiskBarExtractor, RiskLevel};
//!
//! let width = 80;
//! let height = 60;
//! let mut data = vec![255u8; width * height * 3];
//! // Yellow bar, half filled, on a gray track at rows 20..32
//! for y in 20..32 {
//!     for x in 0..width {
//!         let px = if x < 40 { [245u8, 220, 0] } else { [200, 200, 200] };
//!         let i = (y * width + x) * 3;
//!         data[i..i + 3].copy_from_slice(&px);
//!     }
//! }
//!
//! let region = PixelRegion::new(&data, width, height).unwrap();
//! let page = RiskBarExtractor::default().extract(&region, &["glucose"]).unwrap();
//!
//! let glucose = page.get("glucose").unwrap();
//! assert_eq!(glucose.risk, RiskLevel::Mild);
//! assert_eq!(glucose.fill_percent, 49);
//! ```
//!
//! # Pipeline
//!
//! ```text
//! PixelRegion (RGB, cropped to the bar stack)
//!     |
//!     +---> structure mask (not paper)  ---> row density ---> Bands
//!     |                                                         |
//!     +---> ink mask (saturated, bright)                        |
//!                 |                                             |
//!                 +---> per band: first/last filled column ---> FillSpan
//!                                     |
//!                                     +---> median HSV of fill ---> RiskLevel
//! ```
//!
//! Bands are counted on the structure mask rather than the ink mask: an
//! unfilled bar is a gray track with no ink at all, and it still has to
//! occupy its row so that every following bar keeps its label.
//!
//! # Band count and labels
//!
//! Bands are bound to labels strictly by detected order. When the number of
//! bands differs from the number of labels the page fails with
//! [`ExtractError::GeometryMismatch`], or, with
//! [`MismatchPolicy::PadUndetermined`], every label of the page is reported
//! as [`RiskLevel::Undetermined`]. Assigning band *i* to label *i* when the
//! counts disagree would silently shift every row below the missing one.

pub mod classify;
pub mod color;
pub mod error;
pub mod extract;
pub mod mask;
pub mod region;
pub mod segment;
pub mod span;


pub use classify::{
    fill_samples, Assessment, ColorGuard, FillLadder, FillStep, HueClassifier, HueMeasurement,
    HueRule, RiskLevel, RiskScale, Tendency,
};
pub use color::{Hsv, Rgb8};
pub use error::{ExtractError, InputError};
pub use extract::{
    DiseaseResult, DocumentExtraction, ExtractionProfile, MismatchPolicy, PageDiagnostics,
    PageExtraction, PageFailure, PageInput, PageLayout, RiskBarExtractor, RowAnchors,
};
pub use mask::{Axis, BackgroundGate, ColorMask, HueRange, InkGate};
pub use region::{PixelRegion, Rect};
pub use segment::{segment_axis, segment_profile, Band, BandSegmenter, SegmentOptions};
pub use span::{extract_span, ColumnRange, FillSpan, SpanOptions};
