//! Food label field extraction module.

mod corpus;
mod parser;
pub mod rules;

pub use corpus::{LineCorpus, DEFAULT_MIN_CONFIDENCE};
pub use parser::{LabelParser, RuleBasedLabelParser};

use crate::models::label::FoodLabelRecord;
use crate::ocr::OcrLine;

/// Trait for food label extractors.
pub trait LabelExtractor {
    /// Extract a label record from OCR output.
    fn extract(&self, lines: &[OcrLine]) -> FoodLabelRecord;

    /// Extract a label record from plain text, one OCR line per row.
    fn extract_from_text(&self, text: &str) -> FoodLabelRecord;
}
