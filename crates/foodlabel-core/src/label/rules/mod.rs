//! Rule-based field extractors for Chinese food labels.
//!
//! Every extractor is a pure function of the [`LineCorpus`]. A field that
//! is not on the label yields `None`; nothing here returns an error.

pub mod codes;
pub mod dates;
pub mod identity;
pub mod notices;
pub mod nrv;
pub mod nutrition;
pub mod patterns;
pub mod producer;

pub use codes::{extract_barcode, extract_license_number, extract_quality_grade, extract_standard_code};
pub use dates::{extract_production_date, extract_shelf_life};
pub use identity::{extract_ingredients, extract_name, extract_net_content, extract_specification};
pub use notices::{extract_allergens, extract_irradiated, extract_storage_conditions, extract_warning};
pub use nrv::{apply_nrv, nrv_percent, reference_intake};
pub use nutrition::{extract_nutrition, NutritionExtractor};
pub use producer::{extract_address, extract_contact_info, extract_producer};

use regex::Regex;

use super::corpus::LineCorpus;

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from a line corpus.
    fn extract(&self, corpus: &LineCorpus) -> Option<Self::Output>;
}

/// The string-valued fields of a food label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelField {
    Name,
    Ingredients,
    NetContent,
    Specification,
    Producer,
    Address,
    ContactInfo,
    ProductionDate,
    ShelfLife,
    StorageConditions,
    LicenseNumber,
    StandardCode,
    QualityGrade,
    Allergens,
    Warning,
    Irradiated,
    Barcode,
}

impl FieldExtractor for LabelField {
    type Output = String;

    fn extract(&self, corpus: &LineCorpus) -> Option<String> {
        match self {
            LabelField::Name => extract_name(corpus),
            LabelField::Ingredients => extract_ingredients(corpus),
            LabelField::NetContent => extract_net_content(corpus),
            LabelField::Specification => extract_specification(corpus),
            LabelField::Producer => extract_producer(corpus),
            LabelField::Address => extract_address(corpus),
            LabelField::ContactInfo => extract_contact_info(corpus),
            LabelField::ProductionDate => extract_production_date(corpus),
            LabelField::ShelfLife => extract_shelf_life(corpus),
            LabelField::StorageConditions => extract_storage_conditions(corpus),
            LabelField::LicenseNumber => extract_license_number(corpus),
            LabelField::StandardCode => extract_standard_code(corpus),
            LabelField::QualityGrade => extract_quality_grade(corpus),
            LabelField::Allergens => extract_allergens(corpus),
            LabelField::Warning => extract_warning(corpus),
            LabelField::Irradiated => extract_irradiated(corpus),
            LabelField::Barcode => extract_barcode(corpus),
        }
    }
}

/// Capture group 1 of the first pattern that matches, trimmed.
pub(crate) fn first_capture(patterns: &[Regex], text: &str) -> Option<String> {
    patterns
        .iter()
        .find_map(|re| re.captures(text))
        .and_then(|caps| caps.get(1).map(|m| m.as_str().trim().to_string()))
}

/// Length in characters, which is what label heuristics count.
pub(crate) fn char_len(s: &str) -> usize {
    s.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_capture_respects_order() {
        let patterns = vec![
            Regex::new(r"A(\d)").unwrap(),
            Regex::new(r"(\d\d)").unwrap(),
        ];

        assert_eq!(first_capture(&patterns, "12 A3"), Some("3".to_string()));
        assert_eq!(first_capture(&patterns, "12"), Some("12".to_string()));
        assert_eq!(first_capture(&patterns, "none"), None);
    }

    #[test]
    fn test_char_len_counts_cjk_once() {
        assert_eq!(char_len("全麦粉"), 3);
        assert_eq!("全麦粉".len(), 9);
    }

    #[test]
    fn test_label_field_dispatch() {
        let corpus = LineCorpus::from_texts(["净含量：400g"]);
        assert_eq!(LabelField::NetContent.extract(&corpus), Some("400g".to_string()));
        assert_eq!(LabelField::Barcode.extract(&corpus), None);
    }
}
