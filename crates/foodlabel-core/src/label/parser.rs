//! Rule-based label assembler.

use std::time::Instant;

use tracing::debug;

use crate::models::label::FoodLabelRecord;
use crate::ocr::OcrLine;

use super::corpus::{LineCorpus, DEFAULT_MIN_CONFIDENCE};
use super::rules::{FieldExtractor, LabelField, NutritionExtractor};
use super::LabelExtractor;

/// Trait for label parsing.
pub trait LabelParser {
    /// Assemble a full record from a line corpus.
    fn parse(&self, corpus: &LineCorpus) -> FoodLabelRecord;
}

/// Runs every field extractor over one shared corpus.
///
/// The record always carries the full field set: a field that was not
/// recognized is an empty string and an absent nutrition panel is empty.
#[derive(Debug, Clone)]
pub struct RuleBasedLabelParser {
    /// Lines at or below this confidence never reach the extractors.
    min_confidence: f32,
    /// Whether to derive NRV percentages for the nutrition panel.
    compute_nrv: bool,
}

impl RuleBasedLabelParser {
    pub fn new() -> Self {
        Self {
            min_confidence: DEFAULT_MIN_CONFIDENCE,
            compute_nrv: true,
        }
    }

    /// Set minimum confidence threshold.
    pub fn with_min_confidence(mut self, confidence: f32) -> Self {
        self.min_confidence = confidence;
        self
    }

    /// Set NRV computation.
    pub fn with_nrv(mut self, compute_nrv: bool) -> Self {
        self.compute_nrv = compute_nrv;
        self
    }

    pub fn min_confidence(&self) -> f32 {
        self.min_confidence
    }

    /// Build the corpus this parser would read from OCR output.
    pub fn corpus(&self, lines: &[OcrLine]) -> LineCorpus {
        LineCorpus::from_ocr_lines(lines, self.min_confidence)
    }
}

impl Default for RuleBasedLabelParser {
    fn default() -> Self {
        Self::new()
    }
}

impl LabelParser for RuleBasedLabelParser {
    fn parse(&self, corpus: &LineCorpus) -> FoodLabelRecord {
        let start = Instant::now();
        let field = |f: LabelField| f.extract(corpus).unwrap_or_default();

        let nutrition = NutritionExtractor::new()
            .with_nrv(self.compute_nrv)
            .extract(corpus)
            .unwrap_or_default();

        let record = FoodLabelRecord {
            name: field(LabelField::Name),
            ingredients: field(LabelField::Ingredients),
            net_content: field(LabelField::NetContent),
            specification: field(LabelField::Specification),
            producer: field(LabelField::Producer),
            address: field(LabelField::Address),
            contact_info: field(LabelField::ContactInfo),
            production_date: field(LabelField::ProductionDate),
            shelf_life: field(LabelField::ShelfLife),
            storage_conditions: field(LabelField::StorageConditions),
            food_production_license_number: field(LabelField::LicenseNumber),
            product_standard_code: field(LabelField::StandardCode),
            quality_grade: field(LabelField::QualityGrade),
            allergens: field(LabelField::Allergens),
            nutrition,
            warning: field(LabelField::Warning),
            irradiated: field(LabelField::Irradiated),
            commodity_barcode: field(LabelField::Barcode),
        };

        debug!(
            "Parsed label from {} lines in {}us",
            corpus.len(),
            start.elapsed().as_micros()
        );

        record
    }
}

impl LabelExtractor for RuleBasedLabelParser {
    fn extract(&self, lines: &[OcrLine]) -> FoodLabelRecord {
        self.parse(&self.corpus(lines))
    }

    fn extract_from_text(&self, text: &str) -> FoodLabelRecord {
        self.parse(&LineCorpus::from_text(text))
    }
}
