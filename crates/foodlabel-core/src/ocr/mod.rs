//! OCR engines behind a single recognition capability.
//!
//! The extraction core only ever sees [`OcrLine`]s. Which engine produced
//! them is decided by the caller, which constructs one [`OcrRecognizer`]
//! and hands it to [`crate::LabelService`].

mod fixture;
#[cfg(feature = "native")]
mod pure_engine;
mod tesseract;

pub use fixture::FixtureRecognizer;
#[cfg(feature = "native")]
pub use pure_engine::PaddleRecognizer;
pub use tesseract::TesseractRecognizer;

use serde::{Deserialize, Serialize};

use crate::error::OcrError;

/// One recognized text region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OcrLine {
    /// Recognized text content.
    pub text: String,

    /// Recognition confidence score (0.0 - 1.0).
    pub confidence: f32,
}

impl OcrLine {
    pub fn new(text: impl Into<String>, confidence: f32) -> Self {
        Self {
            text: text.into(),
            confidence,
        }
    }
}

/// Image bytes in, text lines in reading order out.
pub trait OcrRecognizer {
    /// Short engine name for logs and reports.
    fn name(&self) -> &str;

    /// Recognize all text lines in an encoded image.
    fn recognize(&self, image: &[u8]) -> Result<Vec<OcrLine>, OcrError>;
}

impl<R: OcrRecognizer + ?Sized> OcrRecognizer for Box<R> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn recognize(&self, image: &[u8]) -> Result<Vec<OcrLine>, OcrError> {
        (**self).recognize(image)
    }
}

/// Order boxes top-to-bottom, then left-to-right within a 20px row band.
///
/// Takes the top-left corner `(x, y)` of each region.
#[cfg(feature = "native")]
pub(crate) fn reading_order(a: (f32, f32), b: (f32, f32)) -> std::cmp::Ordering {
    let row_a = (a.1 / 20.0) as i32;
    let row_b = (b.1 / 20.0) as i32;

    if row_a != row_b {
        row_a.cmp(&row_b)
    } else {
        a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal)
    }
}
