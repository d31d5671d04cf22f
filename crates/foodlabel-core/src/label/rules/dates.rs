use super::patterns::{PRODUCTION_DATE_PATTERNS, SHELF_LIFE_LINE, SHELF_LIFE_QUANTITY};
use super::{first_capture, LineCorpus};

/// Extract the production date as printed, or a "see packaging" notice.
pub fn extract_production_date(corpus: &LineCorpus) -> Option<String> {
    first_capture(&PRODUCTION_DATE_PATTERNS, corpus.full_text())
}

/// Extract shelf life, normalized to quantity and unit ("12个月") when possible.
pub fn extract_shelf_life(corpus: &LineCorpus) -> Option<String> {
    let text = corpus.full_text();

    if let Some(caps) = SHELF_LIFE_QUANTITY.captures(text) {
        return Some(format!("{}{}", &caps[1], &caps[2]));
    }

    SHELF_LIFE_LINE
        .captures(text)
        .map(|caps| caps[1].trim().to_string())
}
