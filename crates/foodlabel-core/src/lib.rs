//! Core library for Chinese food label OCR processing.
//!
//! This crate provides:
//! - A line corpus built from confidence-filtered OCR output
//! - Rule-based extraction of the mandatory label fields (name,
//!   ingredients, net content, producer, dates, codes, notices)
//! - Nutrition facts parsing with NRV percentages
//! - Swappable OCR engines (PaddleOCR via pure-onnx-ocr, tesseract, fixtures)
//! - A recognition service that reports every outcome as a response

pub mod error;
pub mod imaging;
pub mod label;
pub mod models;
pub mod ocr;
pub mod service;

pub use error::{LabelError, OcrError, Result};
pub use imaging::{prepare_image, sniff_format, ImageFormatHint};
pub use label::{LabelExtractor, LabelParser, LineCorpus, RuleBasedLabelParser};
pub use models::config::{EngineKind, LabelConfig};
pub use models::label::{FoodLabelRecord, Nutrient, NutritionPanel};
pub use ocr::{FixtureRecognizer, OcrLine, OcrRecognizer, TesseractRecognizer};
#[cfg(feature = "native")]
pub use ocr::PaddleRecognizer;
pub use service::{LabelService, RecognitionResponse};
