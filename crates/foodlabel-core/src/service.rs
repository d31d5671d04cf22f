//! Recognition service boundary.
//!
//! Wires an injected OCR engine to the extraction core and reports every
//! outcome, including OCR failures, as a [`RecognitionResponse`].

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::Result;
use crate::imaging::{prepare_image, sniff_format};
use crate::label::{LabelExtractor, RuleBasedLabelParser};
use crate::models::config::{ImageConfig, LabelConfig};
use crate::models::label::FoodLabelRecord;
use crate::ocr::{OcrLine, OcrRecognizer};

/// Caller-visible outcome of one recognition request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecognitionResponse {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<FoodLabelRecord>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Wall time in seconds.
    pub processing_time: f64,
}

impl RecognitionResponse {
    pub fn ok(record: FoodLabelRecord, elapsed: Duration) -> Self {
        Self {
            success: true,
            data: Some(record),
            error: None,
            processing_time: elapsed.as_secs_f64(),
        }
    }

    pub fn failure(message: impl Into<String>, elapsed: Duration) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
            processing_time: elapsed.as_secs_f64(),
        }
    }
}

/// Food label recognition service.
pub struct LabelService {
    recognizer: Box<dyn OcrRecognizer>,
    image: ImageConfig,
    parser: RuleBasedLabelParser,
}

impl LabelService {
    /// Create a service with default image preparation and extraction.
    pub fn new(recognizer: Box<dyn OcrRecognizer>) -> Self {
        Self {
            recognizer,
            image: ImageConfig::default(),
            parser: RuleBasedLabelParser::new(),
        }
    }

    /// Create a service configured from a [`LabelConfig`].
    pub fn from_config(recognizer: Box<dyn OcrRecognizer>, config: &LabelConfig) -> Self {
        Self::new(recognizer)
            .with_image_config(config.image.clone())
            .with_parser(
                RuleBasedLabelParser::new()
                    .with_min_confidence(config.ocr.min_confidence)
                    .with_nrv(config.extraction.compute_nrv),
            )
    }

    pub fn with_image_config(mut self, image: ImageConfig) -> Self {
        self.image = image;
        self
    }

    pub fn with_parser(mut self, parser: RuleBasedLabelParser) -> Self {
        self.parser = parser;
        self
    }

    pub fn engine_name(&self) -> &str {
        self.recognizer.name()
    }

    pub fn parser(&self) -> &RuleBasedLabelParser {
        &self.parser
    }

    /// Prepare an image and run OCR on it.
    pub fn read_lines(&self, image: &[u8]) -> Result<Vec<OcrLine>> {
        info!(
            "Recognizing {} image ({} bytes) with {}",
            sniff_format(image),
            image.len(),
            self.recognizer.name()
        );

        let prepared = prepare_image(image, &self.image);
        let lines = self.recognizer.recognize(&prepared)?;

        info!("OCR returned {} lines", lines.len());
        Ok(lines)
    }

    /// Recognize a food label image.
    ///
    /// Never fails: an OCR error becomes `success: false` with the message.
    pub fn recognize(&self, image: &[u8]) -> RecognitionResponse {
        let start = Instant::now();

        match self.read_lines(image) {
            Ok(lines) => self.finish(&lines, start),
            Err(e) => {
                warn!("Recognition failed after {:?}: {}", start.elapsed(), e);
                RecognitionResponse::failure(e.to_string(), start.elapsed())
            }
        }
    }

    /// Extract a label from lines that were recognized elsewhere.
    pub fn recognize_lines(&self, lines: &[OcrLine]) -> RecognitionResponse {
        self.finish(lines, Instant::now())
    }

    fn finish(&self, lines: &[OcrLine], start: Instant) -> RecognitionResponse {
        let record = self.parser.extract(lines);

        info!(
            "Extracted label in {:.3}s (name: {:?})",
            start.elapsed().as_secs_f64(),
            record.name
        );

        RecognitionResponse::ok(record, start.elapsed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OcrError;
    use crate::ocr::FixtureRecognizer;
    use pretty_assertions::assert_eq;

    struct BrokenRecognizer;

    impl OcrRecognizer for BrokenRecognizer {
        fn name(&self) -> &str {
            "broken"
        }

        fn recognize(&self, _image: &[u8]) -> std::result::Result<Vec<OcrLine>, OcrError> {
            Err(OcrError::Recognition("engine crashed".to_string()))
        }
    }

    fn fixture_service() -> LabelService {
        let fixture = FixtureRecognizer::from_texts(["全麦吐司面包", "净含量：400g", "保质期：7天"]);
        LabelService::new(Box::new(fixture))
    }

    #[test]
    fn test_recognize_success() {
        let response = fixture_service().recognize(b"not really an image");

        assert!(response.success);
        assert_eq!(response.error, None);

        let record = response.data.unwrap();
        assert_eq!(record.name, "全麦吐司面包");
        assert_eq!(record.net_content, "400g");
        assert_eq!(record.shelf_life, "7天");
    }

    #[test]
    fn test_ocr_failure_becomes_response() {
        let service = LabelService::new(Box::new(BrokenRecognizer));
        let response = service.recognize(&[0xFF, 0xD8]);

        assert!(!response.success);
        assert!(response.data.is_none());
        assert!(response.error.unwrap().contains("engine crashed"));
        assert!(response.processing_time >= 0.0);
    }

    #[test]
    fn test_response_shape() {
        let ok = serde_json::to_value(fixture_service().recognize(b"")).unwrap();
        assert_eq!(ok["success"], true);
        assert!(ok["data"].is_object());
        assert!(ok.get("error").is_none());
        assert!(ok["processingTime"].is_number());

        let failed = serde_json::to_value(RecognitionResponse::failure(
            "image too large",
            Duration::from_millis(1500),
        ))
        .unwrap();
        assert_eq!(
            failed,
            serde_json::json!({"success": false, "error": "image too large", "processingTime": 1.5})
        );
    }

    #[test]
    fn test_config_applies_confidence_threshold() {
        let fixture = FixtureRecognizer::new(vec![
            OcrLine::new("净含量：400g", 0.3),
            OcrLine::new("保质期：7天", 0.9),
        ]);
        let mut config = LabelConfig::default();
        config.ocr.min_confidence = 0.5;

        let service = LabelService::from_config(Box::new(fixture), &config);
        let record = service.recognize(b"").data.unwrap();

        assert_eq!(record.net_content, "");
        assert_eq!(record.shelf_life, "7天");
        assert_eq!(service.engine_name(), "fixture");
    }

    #[test]
    fn test_recognize_lines_skips_ocr() {
        let service = LabelService::new(Box::new(BrokenRecognizer));
        let response = service.recognize_lines(&[OcrLine::new("条码：6901234567892", 1.0)]);

        assert!(response.success);
        assert_eq!(response.data.unwrap().commodity_barcode, "6901234567892");
    }
}
