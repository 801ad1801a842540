pub mod extraction;
pub mod raster;

pub use extraction::{
    DetectError, DetectRequest, Detection, DetectionReport, ExtractionService, PageReport,
    RiskResult, ENGINE,
};
pub use raster::{decode_png, RasterError, RasterPage};
