//! Consumer notices: storage, warnings, irradiation, allergens.

use super::patterns::{
    ALLERGEN_CLAUSE, ALLERGEN_KEYWORDS, STORAGE_KEYWORDS, STORAGE_STOP_WORDS, WARNING_KEYWORDS,
};
use super::LineCorpus;

const STORAGE_LOOKAHEAD: usize = 2;
const IRRADIATED_NOTICE: &str = "本品已辐照";

/// Extract storage conditions, including up to two continuation lines.
pub fn extract_storage_conditions(corpus: &LineCorpus) -> Option<String> {
    let lines = corpus.lines();

    let idx = lines
        .iter()
        .position(|line| STORAGE_KEYWORDS.iter().any(|kw| line.contains(kw)))?;

    let mut storage = lines[idx].trim().to_string();
    for next in lines.iter().skip(idx + 1).take(STORAGE_LOOKAHEAD) {
        if STORAGE_STOP_WORDS.iter().any(|w| next.contains(w)) {
            break;
        }
        storage.push(' ');
        storage.push_str(next.trim());
    }

    Some(storage)
}

/// The first line carrying a warning keyword.
pub fn extract_warning(corpus: &LineCorpus) -> Option<String> {
    corpus
        .lines()
        .iter()
        .find(|line| WARNING_KEYWORDS.iter().any(|kw| line.contains(kw)))
        .map(|line| line.trim().to_string())
}

/// A fixed notice when the label mentions irradiation (辐照).
pub fn extract_irradiated(corpus: &LineCorpus) -> Option<String> {
    corpus
        .full_text()
        .contains("辐照")
        .then(|| IRRADIATED_NOTICE.to_string())
}

/// Extract the allergen statement.
///
/// Keywords are scanned in order. The first one present decides: the
/// statement clause is returned when one is printed, otherwise a generic
/// "含有<keyword>".
pub fn extract_allergens(corpus: &LineCorpus) -> Option<String> {
    let text = corpus.full_text();
    let keyword = ALLERGEN_KEYWORDS.iter().find(|kw| text.contains(*kw))?;

    match ALLERGEN_CLAUSE.captures(text) {
        Some(caps) => Some(caps[1].trim().to_string()),
        None => Some(format!("含有{}", keyword)),
    }
}
