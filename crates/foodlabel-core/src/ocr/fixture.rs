//! Fixture-backed recognizer for tests and offline runs.

use std::path::Path;

use tracing::debug;

use crate::error::OcrError;

use super::{OcrLine, OcrRecognizer};

/// Returns the same lines for every image.
#[derive(Debug, Clone, Default)]
pub struct FixtureRecognizer {
    lines: Vec<OcrLine>,
}

impl FixtureRecognizer {
    /// Create a recognizer returning the given lines.
    pub fn new(lines: Vec<OcrLine>) -> Self {
        Self { lines }
    }

    /// Every text gets full confidence.
    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(texts.into_iter().map(|t| OcrLine::new(t, 1.0)).collect())
    }

    /// Load a fixture file.
    ///
    /// A file whose content parses as a JSON array of `{text, confidence}`
    /// objects is taken as-is; anything else is read as plain text, one
    /// line per row at full confidence.
    pub fn from_file(path: &Path) -> Result<Self, OcrError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            OcrError::Unavailable(format!("cannot read fixture {}: {}", path.display(), e))
        })?;

        Ok(Self::parse(&content))
    }

    /// Parse fixture content (JSON lines array or plain text).
    pub fn parse(content: &str) -> Self {
        if content.trim_start().starts_with('[') {
            if let Ok(lines) = serde_json::from_str::<Vec<OcrLine>>(content) {
                debug!("Loaded {} fixture lines from JSON", lines.len());
                return Self::new(lines);
            }
        }

        Self::from_texts(content.lines())
    }

    pub fn lines(&self) -> &[OcrLine] {
        &self.lines
    }
}

impl OcrRecognizer for FixtureRecognizer {
    fn name(&self) -> &str {
        "fixture"
    }

    fn recognize(&self, _image: &[u8]) -> Result<Vec<OcrLine>, OcrError> {
        Ok(self.lines.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json_fixture() {
        let fixture = FixtureRecognizer::parse(
            r#"[{"text": "净含量：400g", "confidence": 0.98}, {"text": "噪点", "confidence": 0.05}]"#,
        );

        assert_eq!(fixture.lines().len(), 2);
        assert_eq!(fixture.lines()[1].confidence, 0.05);
    }

    #[test]
    fn test_parse_plain_text_fixture() {
        let fixture = FixtureRecognizer::parse("全麦吐司面包\n净含量：400g\n");

        assert_eq!(
            fixture.lines(),
            &[OcrLine::new("全麦吐司面包", 1.0), OcrLine::new("净含量：400g", 1.0)]
        );
    }

    #[test]
    fn test_bracketed_plain_text_is_not_json() {
        let fixture = FixtureRecognizer::parse("[进口]黑巧克力");
        assert_eq!(fixture.lines()[0].text, "[进口]黑巧克力");
    }

    #[test]
    fn test_recognize_ignores_image() {
        let fixture = FixtureRecognizer::from_texts(["配料：水"]);
        let lines = fixture.recognize(b"not an image").unwrap();
        assert_eq!(lines.len(), 1);
    }
}
