//! Nutrient Reference Value percentages (GB 28050).

use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::models::label::{Nutrient, NutritionPanel};

use super::patterns::{KCAL_UNIT, LEADING_NUMBER};

/// Daily reference intake: kJ for energy, mg for sodium, g otherwise.
pub fn reference_intake(nutrient: Nutrient) -> Decimal {
    match nutrient {
        Nutrient::Energy => Decimal::from(8400),
        Nutrient::Protein => Decimal::from(60),
        Nutrient::Fat => Decimal::from(60),
        Nutrient::Carbohydrate => Decimal::from(300),
        Nutrient::Sugar => Decimal::from(50),
        Nutrient::Sodium => Decimal::from(2000),
    }
}

/// Percentage of the reference intake, truncated toward zero.
///
/// `value` is a formatted nutrient string such as "1450kJ" or "200kcal".
/// Kilocalories are converted to kilojoules; other units are taken to
/// match the reference unit as-is.
pub fn nrv_percent(value: &str, nutrient: Nutrient) -> Option<u64> {
    let value = ascii_digits(value);
    let number = LEADING_NUMBER.captures(&value)?;
    let mut amount = Decimal::from_str(&number[1]).ok()?;

    if nutrient == Nutrient::Energy && KCAL_UNIT.is_match(&value) {
        amount = amount.checked_mul(Decimal::new(4184, 3))?;
    }

    amount
        .checked_mul(Decimal::ONE_HUNDRED)?
        .checked_div(reference_intake(nutrient))?
        .floor()
        .to_u64()
}

/// Fold full-width digits and decimal points from OCR output to ASCII.
fn ascii_digits(value: &str) -> String {
    value
        .chars()
        .map(|c| match c {
            '０'..='９' => char::from_u32(c as u32 - '０' as u32 + '0' as u32).unwrap_or(c),
            '．' => '.',
            _ => c,
        })
        .collect()
}

/// Fill the NRV entry of every nutrient present in the panel.
pub fn apply_nrv(panel: &mut NutritionPanel) {
    let percents: Vec<(Nutrient, u64)> = panel
        .present()
        .filter_map(|(nutrient, value)| nrv_percent(value, nutrient).map(|p| (nutrient, p)))
        .collect();

    for (nutrient, percent) in percents {
        panel.set_nrv(nutrient, format!("{}%", percent));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_percent_truncates() {
        assert_eq!(nrv_percent("1450kJ", Nutrient::Energy), Some(17));
        assert_eq!(nrv_percent("10.2g", Nutrient::Protein), Some(17));
        assert_eq!(nrv_percent("5.6g", Nutrient::Fat), Some(9));
        assert_eq!(nrv_percent("29.9g", Nutrient::Carbohydrate), Some(9));
        assert_eq!(nrv_percent("400mg", Nutrient::Sodium), Some(20));
    }

    #[test]
    fn test_full_width_digits() {
        assert_eq!(nrv_percent("１０g", Nutrient::Protein), Some(16));
        assert_eq!(nrv_percent("１４５０．５kJ", Nutrient::Energy), Some(17));
        assert_eq!(ascii_digits("蛋白质１０．２g"), "蛋白质10.2g");
    }

    #[test]
    fn test_kcal_converted_to_kj() {
        // 200 kcal = 836.8 kJ, 9.96% of 8400 kJ
        assert_eq!(nrv_percent("200kcal", Nutrient::Energy), Some(9));
        assert_eq!(nrv_percent("200千卡", Nutrient::Energy), Some(9));
        assert_eq!(nrv_percent("200kJ", Nutrient::Energy), Some(2));
    }

    #[test]
    fn test_exact_arithmetic() {
        // 17.4 / 60 * 100 is 28.999... in f64
        assert_eq!(nrv_percent("17.4g", Nutrient::Protein), Some(29));
        assert_eq!(nrv_percent("8400kJ", Nutrient::Energy), Some(100));
    }

    #[test]
    fn test_unparseable_value() {
        assert_eq!(nrv_percent("微量", Nutrient::Sugar), None);
    }

    #[test]
    fn test_apply_nrv_only_for_present_nutrients() {
        let mut panel = NutritionPanel::default();
        panel.set(Nutrient::Energy, "1450kJ");
        panel.set(Nutrient::Protein, "10.2g");

        apply_nrv(&mut panel);

        assert_eq!(panel.nrv(Nutrient::Energy), Some("17%"));
        assert_eq!(panel.nrv(Nutrient::Protein), Some("17%"));
        assert_eq!(panel.nrv(Nutrient::Fat), None);
        assert_eq!(panel.nrv(Nutrient::Sodium), None);
    }
}
