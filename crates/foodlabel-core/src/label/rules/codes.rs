//! Registration codes printed on the label: licence, standard, grade, barcode.

use super::patterns::{
    BARCODE_PATTERNS, LICENSE_PATTERNS, QUALITY_GRADE_PATTERNS, STANDARD_CODE_PATTERNS,
};
use super::{first_capture, LineCorpus};

/// Extract the food production licence number (SC... or legacy QS...).
pub fn extract_license_number(corpus: &LineCorpus) -> Option<String> {
    first_capture(&LICENSE_PATTERNS, corpus.full_text())
}

/// Extract the product standard code, e.g. "GB/T 20981".
pub fn extract_standard_code(corpus: &LineCorpus) -> Option<String> {
    first_capture(&STANDARD_CODE_PATTERNS, corpus.full_text())
}

pub fn extract_quality_grade(corpus: &LineCorpus) -> Option<String> {
    first_capture(&QUALITY_GRADE_PATTERNS, corpus.full_text())
}

/// Extract a 13-digit commodity barcode.
///
/// Unlabeled codes are only recognized with the Chinese GS1 prefix 69.
pub fn extract_barcode(corpus: &LineCorpus) -> Option<String> {
    first_capture(&BARCODE_PATTERNS, corpus.full_text())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_license_number() {
        let sc = LineCorpus::from_texts(["食品生产许可证编号：SC10611010500123"]);
        let qs = LineCorpus::from_texts(["QS110001010001"]);
        let short_sc = LineCorpus::from_texts(["许可证 SC123456789012"]);

        assert_eq!(extract_license_number(&sc), Some("SC10611010500123".to_string()));
        assert_eq!(extract_license_number(&qs), Some("QS110001010001".to_string()));
        assert_eq!(extract_license_number(&short_sc), Some("SC123456789012".to_string()));
    }

    #[test]
    fn test_standard_code() {
        let labeled = LineCorpus::from_texts(["产品标准代号：GB/T 20981"]);
        let industry = LineCorpus::from_texts(["执行标准 SB/T 10379"]);
        let additive = LineCorpus::from_texts(["配料：水、食品添加剂(符合GB 2760)"]);

        assert_eq!(extract_standard_code(&labeled), Some("GB/T 20981".to_string()));
        assert_eq!(extract_standard_code(&industry), Some("SB/T 10379".to_string()));
        assert_eq!(extract_standard_code(&additive), None);
    }

    #[test]
    fn test_quality_grade() {
        let labeled = LineCorpus::from_texts(["质量等级：一级"]);
        let bare = LineCorpus::from_texts(["特等品"]);

        assert_eq!(extract_quality_grade(&labeled), Some("一级".to_string()));
        assert_eq!(extract_quality_grade(&bare), Some("特等品".to_string()));
    }

    #[test]
    fn test_labeled_barcode() {
        let corpus = LineCorpus::from_texts(["条码：4901234567894"]);
        assert_eq!(extract_barcode(&corpus), Some("4901234567894".to_string()));
    }

    #[test]
    fn test_unlabeled_barcode_needs_prefix() {
        let chinese = LineCorpus::from_texts(["6901234567892"]);
        let foreign = LineCorpus::from_texts(["4901234567894"]);

        assert_eq!(extract_barcode(&chinese), Some("6901234567892".to_string()));
        assert_eq!(extract_barcode(&foreign), None);
    }

    #[test]
    fn test_barcode_from_longer_digit_run() {
        let corpus = LineCorpus::from_texts(["69123456789012"]);
        let barcode = extract_barcode(&corpus).unwrap();

        assert!(barcode.starts_with("69"));
        assert_eq!(barcode.len(), 13);
    }
}
