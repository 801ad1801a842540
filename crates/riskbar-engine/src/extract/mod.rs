//! Row-to-label orchestration.
//!
//! Ties the stages together for one page: crop, segment, check the band
//! count against the expected labels, then measure and classify each band
//! in reading order. Bands are always found first and bound to labels by
//! detected order; template coordinates only feed plausibility warnings.

mod extractor;
mod layout;
mod profile;
mod report;

pub use extractor::{PageInput, RiskBarExtractor};
pub use layout::{PageLayout, RowAnchors};
pub use profile::{ExtractionProfile, MismatchPolicy};
pub use report::{DiseaseResult, DocumentExtraction, PageDiagnostics, PageExtraction, PageFailure};
