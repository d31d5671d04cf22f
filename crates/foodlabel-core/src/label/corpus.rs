//! The filtered line set that every extractor reads.

use tracing::debug;

use crate::ocr::OcrLine;

/// Default confidence a line must exceed to enter the corpus.
pub const DEFAULT_MIN_CONFIDENCE: f32 = 0.1;

/// OCR lines of one label in reading order, plus their newline-joined text.
///
/// `full_text` is what single-shot pattern lookups search; `lines` serves
/// line-local and multi-line window lookups.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineCorpus {
    lines: Vec<String>,
    full_text: String,
}

impl LineCorpus {
    /// Build a corpus from OCR output.
    ///
    /// Lines at or below `min_confidence`, or empty once trimmed, are
    /// dropped. Order is kept as the engine reported it.
    pub fn from_ocr_lines(ocr_lines: &[OcrLine], min_confidence: f32) -> Self {
        let corpus = Self::from_texts(
            ocr_lines
                .iter()
                .filter(|line| line.confidence > min_confidence)
                .map(|line| line.text.as_str()),
        );

        debug!(
            "Line corpus: kept {} of {} OCR lines",
            corpus.len(),
            ocr_lines.len()
        );

        corpus
    }

    /// Build a corpus from already-trusted text lines.
    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let lines: Vec<String> = texts
            .into_iter()
            .map(|t| t.as_ref().trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
        let full_text = lines.join("\n");

        Self { lines, full_text }
    }

    /// Build a corpus from a block of text, one line per row.
    pub fn from_text(text: &str) -> Self {
        Self::from_texts(text.lines())
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn full_text(&self) -> &str {
        &self.full_text
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_confidence_filter() {
        let ocr = vec![
            OcrLine::new("全麦吐司面包", 0.98),
            OcrLine::new("噪点", 0.1),
            OcrLine::new("净含量：400g", 0.85),
            OcrLine::new("模糊", 0.05),
        ];

        let corpus = LineCorpus::from_ocr_lines(&ocr, DEFAULT_MIN_CONFIDENCE);

        assert_eq!(corpus.lines(), &["全麦吐司面包".to_string(), "净含量：400g".to_string()]);
        assert_eq!(corpus.full_text(), "全麦吐司面包\n净含量：400g");
    }

    #[test]
    fn test_blank_lines_dropped_and_trimmed() {
        let ocr = vec![
            OcrLine::new("   ", 0.99),
            OcrLine::new("  配料：水  ", 0.99),
            OcrLine::new("", 0.99),
        ];

        let corpus = LineCorpus::from_ocr_lines(&ocr, DEFAULT_MIN_CONFIDENCE);
        assert_eq!(corpus.lines(), &["配料：水".to_string()]);
    }

    #[test]
    fn test_all_low_confidence_yields_empty_corpus() {
        let ocr = vec![OcrLine::new("能量", 0.02), OcrLine::new("钠", 0.1)];
        let corpus = LineCorpus::from_ocr_lines(&ocr, DEFAULT_MIN_CONFIDENCE);

        assert!(corpus.is_empty());
        assert_eq!(corpus.full_text(), "");
    }

    #[test]
    fn test_from_text_splits_lines() {
        let corpus = LineCorpus::from_text("产品名称：酱油\n\n净含量：500mL\n");
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.full_text(), "产品名称：酱油\n净含量：500mL");
    }
}
