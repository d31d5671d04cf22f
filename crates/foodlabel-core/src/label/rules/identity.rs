//! Product identity fields: name, ingredients, net content, specification.

use super::patterns::{
    FIELD_LABELS, INGREDIENTS_LABEL, NAME_LABEL, NET_CONTENT_PATTERNS, SPECIFICATION_PATTERNS,
};
use super::{char_len, first_capture, LineCorpus};

const NAME_KEYWORDS: &[&str] = &["食品名称", "产品名称"];
const INGREDIENT_KEYWORDS: &[&str] = &["配料", "成分", "原料"];

/// Shorter ingredient values are assumed to continue on the next lines.
const INGREDIENTS_MIN_CHARS: usize = 10;
/// Continuation stops once the value grows past this.
const INGREDIENTS_MAX_CHARS: usize = 50;
const INGREDIENTS_LOOKAHEAD: usize = 4;

/// Extract the food name.
///
/// A labeled line wins; otherwise the first line of plausible length,
/// which on most packages is the product name printed at the top.
pub fn extract_name(corpus: &LineCorpus) -> Option<String> {
    for line in corpus.lines() {
        if NAME_KEYWORDS.iter().any(|kw| line.contains(kw)) {
            if let Some(caps) = NAME_LABEL.captures(line) {
                return Some(caps[1].trim().to_string());
            }
        }
    }

    corpus
        .lines()
        .iter()
        .find(|line| {
            let len = char_len(line);
            len > 2 && len < 50
        })
        .map(|line| line.trim().to_string())
}

/// Extract the ingredient list, following it onto later lines when short.
pub fn extract_ingredients(corpus: &LineCorpus) -> Option<String> {
    let lines = corpus.lines();

    for (idx, line) in lines.iter().enumerate() {
        if !INGREDIENT_KEYWORDS.iter().any(|kw| line.contains(kw)) {
            continue;
        }
        let Some(caps) = INGREDIENTS_LABEL.captures(line) else {
            continue;
        };

        let mut ingredients = caps[1].trim().to_string();
        if char_len(&ingredients) < INGREDIENTS_MIN_CHARS {
            for next in lines.iter().skip(idx + 1).take(INGREDIENTS_LOOKAHEAD) {
                if starts_other_field(next) {
                    break;
                }
                ingredients.push(' ');
                ingredients.push_str(next.trim());
                if char_len(&ingredients) > INGREDIENTS_MAX_CHARS {
                    break;
                }
            }
        }

        return Some(ingredients.trim().to_string());
    }

    None
}

/// True when a line opens another labeled field.
pub(crate) fn starts_other_field(line: &str) -> bool {
    let has_colon = line.contains(':') || line.contains('：');
    FIELD_LABELS
        .iter()
        .any(|label| line.starts_with(label) || (has_colon && line.contains(label)))
}

/// Extract net content as value and unit with no space, e.g. "400g".
pub fn extract_net_content(corpus: &LineCorpus) -> Option<String> {
    let text = corpus.full_text();

    for re in NET_CONTENT_PATTERNS.iter() {
        if let Some(caps) = re.captures(text) {
            let value = &caps[1];
            let unit = caps.get(2).map_or("克", |m| m.as_str());
            return Some(format!("{}{}", value, unit));
        }
    }

    None
}

/// Extract the package specification (规格).
pub fn extract_specification(corpus: &LineCorpus) -> Option<String> {
    first_capture(&SPECIFICATION_PATTERNS, corpus.full_text())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labeled_name() {
        let corpus = LineCorpus::from_texts(["营养成分表", "产品名称：特级生抽酱油"]);
        assert_eq!(extract_name(&corpus), Some("特级生抽酱油".to_string()));
    }

    #[test]
    fn test_name_falls_back_to_first_plausible_line() {
        let corpus = LineCorpus::from_texts(["QS", "全麦吐司面包", "配料：水"]);
        assert_eq!(extract_name(&corpus), Some("全麦吐司面包".to_string()));
    }

    #[test]
    fn test_name_absent_for_empty_corpus() {
        assert_eq!(extract_name(&LineCorpus::default()), None);
    }

    #[test]
    fn test_ingredients_single_line() {
        let corpus = LineCorpus::from_texts([
            "配料：全麦粉、小麦粉、水、白砂糖、食用植物油、酵母、食盐",
            "净含量：400g",
        ]);

        assert_eq!(
            extract_ingredients(&corpus),
            Some("全麦粉、小麦粉、水、白砂糖、食用植物油、酵母、食盐".to_string())
        );
    }

    #[test]
    fn test_ingredients_continue_onto_next_lines() {
        let corpus = LineCorpus::from_texts([
            "配料表：水、",
            "非转基因大豆、小麦粉",
            "食用盐、白砂糖",
            "保质期：18个月",
        ]);

        assert_eq!(
            extract_ingredients(&corpus),
            Some("水、 非转基因大豆、小麦粉 食用盐、白砂糖".to_string())
        );
    }

    #[test]
    fn test_ingredients_skip_keyword_line_without_value() {
        let corpus = LineCorpus::from_texts([
            "营养成分表：",
            "能量 1450kJ",
            "配料：全麦粉、小麦粉、水、白砂糖、酵母",
        ]);

        assert_eq!(
            extract_ingredients(&corpus),
            Some("全麦粉、小麦粉、水、白砂糖、酵母".to_string())
        );
        assert_eq!(extract_ingredients(&LineCorpus::from_texts(["配料表：", "水"])), None);
    }

    #[test]
    fn test_ingredients_stop_at_next_field() {
        let corpus = LineCorpus::from_texts(["配料：全麦粉、小麦粉、水", "净含量：400g"]);
        assert_eq!(extract_ingredients(&corpus), Some("全麦粉、小麦粉、水".to_string()));
    }

    #[test]
    fn test_ingredients_stop_growing_past_threshold() {
        let long = "甲".repeat(45);
        let corpus = LineCorpus::from_texts(["原料：乙", long.as_str(), "丙丙丙丙丙丙", "丁丁"]);

        let value = extract_ingredients(&corpus).unwrap();
        assert_eq!(value, format!("乙 {} 丙丙丙丙丙丙", long));
    }

    #[test]
    fn test_net_content_units() {
        let grams = LineCorpus::from_texts(["净含量：400g"]);
        let millilitres = LineCorpus::from_texts(["净含量: 500mL"]);
        let kilograms = LineCorpus::from_texts(["净含量：2.5千克"]);
        let per_bag = LineCorpus::from_texts(["200克/袋"]);

        assert_eq!(extract_net_content(&grams), Some("400g".to_string()));
        assert_eq!(extract_net_content(&millilitres), Some("500mL".to_string()));
        assert_eq!(extract_net_content(&kilograms), Some("2.5千克".to_string()));
        assert_eq!(extract_net_content(&per_bag), Some("200克".to_string()));
    }

    #[test]
    fn test_specification() {
        let labeled = LineCorpus::from_texts(["规格：400g×6袋"]);
        let per_bag = LineCorpus::from_texts(["净含量：400g", "400g/袋"]);
        let per_box = LineCorpus::from_texts(["200g/盒"]);

        assert_eq!(extract_specification(&labeled), Some("400g×6袋".to_string()));
        assert_eq!(extract_specification(&per_bag), Some("400".to_string()));
        assert_eq!(extract_specification(&per_box), Some("200".to_string()));
    }
}
