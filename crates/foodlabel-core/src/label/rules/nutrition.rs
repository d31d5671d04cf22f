//! Nutrition facts table extraction.
//!
//! Two passes: labeled inline values over the full text, then, only when
//! that finds nothing, a line-by-line scan of table rows.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::models::label::{Nutrient, NutritionPanel};

use super::nrv::apply_nrv;
use super::patterns::{
    nutrient_row_pattern, CARBOHYDRATE_PATTERNS, ENERGY_PATTERNS, FAT_PATTERNS, PROTEIN_PATTERNS,
    SODIUM_PATTERNS, SUGAR_PATTERNS,
};
use super::{FieldExtractor, LineCorpus};

lazy_static! {
    static ref TABLE_ROWS: Vec<(Nutrient, Regex)> = Nutrient::ALL
        .iter()
        .map(|n| (*n, nutrient_row_pattern(n.label())))
        .collect();
}

fn inline_patterns(nutrient: Nutrient) -> &'static [Regex] {
    match nutrient {
        Nutrient::Energy => &ENERGY_PATTERNS,
        Nutrient::Protein => &PROTEIN_PATTERNS,
        Nutrient::Fat => &FAT_PATTERNS,
        Nutrient::Carbohydrate => &CARBOHYDRATE_PATTERNS,
        Nutrient::Sugar => &SUGAR_PATTERNS,
        Nutrient::Sodium => &SODIUM_PATTERNS,
    }
}

/// Nutrition panel extractor.
#[derive(Debug, Clone, Copy)]
pub struct NutritionExtractor {
    compute_nrv: bool,
}

impl Default for NutritionExtractor {
    fn default() -> Self {
        Self { compute_nrv: true }
    }
}

impl NutritionExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable the derived NRV entries.
    pub fn with_nrv(mut self, compute_nrv: bool) -> Self {
        self.compute_nrv = compute_nrv;
        self
    }

    /// Extract the panel. Empty when no nutrient was found.
    pub fn extract_panel(&self, corpus: &LineCorpus) -> NutritionPanel {
        let mut panel = self.extract_inline(corpus.full_text());

        if panel.is_empty() {
            panel = self.extract_table(corpus.lines());
            if !panel.is_empty() {
                debug!("Nutrition read from table rows");
            }
        }

        if self.compute_nrv && !panel.is_empty() {
            apply_nrv(&mut panel);
        }

        panel
    }

    fn extract_inline(&self, text: &str) -> NutritionPanel {
        let mut panel = NutritionPanel::default();

        for nutrient in Nutrient::ALL {
            let found = inline_patterns(nutrient)
                .iter()
                .find_map(|re| re.captures(text));
            if let Some(caps) = found {
                panel.set(nutrient, format!("{}{}", &caps[1], &caps[2]));
            }
        }

        panel
    }

    fn extract_table(&self, lines: &[String]) -> NutritionPanel {
        let mut panel = NutritionPanel::default();

        for line in lines {
            for (nutrient, row) in TABLE_ROWS.iter() {
                if !line.contains(nutrient.label()) {
                    continue;
                }
                if let Some(caps) = row.captures(line) {
                    panel.set(*nutrient, format!("{}{}", &caps[1], &caps[2]));
                }
            }
        }

        panel
    }
}

impl FieldExtractor for NutritionExtractor {
    type Output = NutritionPanel;

    fn extract(&self, corpus: &LineCorpus) -> Option<NutritionPanel> {
        let panel = self.extract_panel(corpus);
        (!panel.is_empty()).then_some(panel)
    }
}

/// Extract the nutrition panel with NRV percentages.
pub fn extract_nutrition(corpus: &LineCorpus) -> NutritionPanel {
    NutritionExtractor::new().extract_panel(corpus)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_inline_values_with_nrv() {
        let corpus = LineCorpus::from_texts(["能量 1450kJ 蛋白质10.2g 脂肪5.6g"]);
        let panel = extract_nutrition(&corpus);

        let mut expected = NutritionPanel::default();
        expected.set(Nutrient::Energy, "1450kJ");
        expected.set(Nutrient::Protein, "10.2g");
        expected.set(Nutrient::Fat, "5.6g");
        expected.set_nrv(Nutrient::Energy, "17%");
        expected.set_nrv(Nutrient::Protein, "17%");
        expected.set_nrv(Nutrient::Fat, "9%");

        assert_eq!(panel, expected);
    }

    #[test]
    fn test_inline_units() {
        let corpus = LineCorpus::from_texts([
            "能量：200kcal",
            "碳水化合物：45.0克",
            "糖 3g",
            "钠 400mg",
        ]);
        let panel = extract_nutrition(&corpus);

        assert_eq!(panel.get(Nutrient::Energy), Some("200kcal"));
        assert_eq!(panel.nrv(Nutrient::Energy), Some("9%"));
        assert_eq!(panel.get(Nutrient::Carbohydrate), Some("45.0克"));
        assert_eq!(panel.nrv(Nutrient::Carbohydrate), Some("15%"));
        assert_eq!(panel.get(Nutrient::Sugar), Some("3g"));
        assert_eq!(panel.get(Nutrient::Sodium), Some("400mg"));
        assert_eq!(panel.nrv(Nutrient::Sodium), Some("20%"));
    }

    #[test]
    fn test_table_fallback() {
        // "份" is not an inline unit, so only the table scan picks these up
        let corpus = LineCorpus::from_texts(["营养成分表", "能量 1450每份", "蛋白质 6.0份"]);
        let panel = extract_nutrition(&corpus);

        assert_eq!(panel.get(Nutrient::Energy), Some("1450每份"));
        assert_eq!(panel.get(Nutrient::Protein), Some("6.0份"));
        assert_eq!(panel.nrv(Nutrient::Protein), Some("10%"));
    }

    #[test]
    fn test_table_later_rows_overwrite() {
        let corpus = LineCorpus::from_texts(["蛋白质 6.0份", "蛋白质 8.0份"]);
        let panel = extract_nutrition(&corpus);
        assert_eq!(panel.get(Nutrient::Protein), Some("8.0份"));
    }

    #[test]
    fn test_table_skipped_when_inline_found() {
        let corpus = LineCorpus::from_texts(["脂肪 5.6g", "蛋白质 6.0份"]);
        let panel = extract_nutrition(&corpus);

        assert_eq!(panel.get(Nutrient::Fat), Some("5.6g"));
        assert_eq!(panel.get(Nutrient::Protein), None);
    }

    #[test]
    fn test_no_nutrition() {
        let corpus = LineCorpus::from_texts(["配料：水、白砂糖"]);
        assert!(extract_nutrition(&corpus).is_empty());
        assert_eq!(NutritionExtractor::new().extract(&corpus), None);
    }

    #[test]
    fn test_full_width_value_keeps_nrv() {
        let corpus = LineCorpus::from_texts(["蛋白质１０g"]);
        let panel = extract_nutrition(&corpus);

        assert_eq!(panel.get(Nutrient::Protein), Some("１０g"));
        assert_eq!(panel.nrv(Nutrient::Protein), Some("16%"));
    }

    #[test]
    fn test_nrv_disabled() {
        let corpus = LineCorpus::from_texts(["蛋白质10.2g"]);
        let panel = NutritionExtractor::new().with_nrv(false).extract_panel(&corpus);

        assert_eq!(panel.get(Nutrient::Protein), Some("10.2g"));
        assert_eq!(panel.nrv(Nutrient::Protein), None);
    }
}
