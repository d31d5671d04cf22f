//! Food label data models.
//!
//! The serialized shape is a fixed contract with API consumers: every
//! field of [`FoodLabelRecord`] is always present, unrecognized values are
//! empty strings, and `nutrition` is an object holding only the nutrients
//! that were found.

use serde::{Deserialize, Serialize};

/// Structured content of one food label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodLabelRecord {
    /// Food name (食品名称).
    pub name: String,

    /// Ingredient list (配料表).
    pub ingredients: String,

    /// Net content, value and unit with no space (e.g. "400g").
    pub net_content: String,

    /// Package specification (规格).
    pub specification: String,

    /// Producer name.
    pub producer: String,

    /// Producer address.
    pub address: String,

    /// Phone number or other contact line.
    pub contact_info: String,

    /// Production date as printed.
    pub production_date: String,

    /// Shelf life (e.g. "18个月").
    pub shelf_life: String,

    /// Storage conditions.
    pub storage_conditions: String,

    /// Food production license number (SC/QS).
    pub food_production_license_number: String,

    /// Product standard code (e.g. "GB/T 20981").
    pub product_standard_code: String,

    /// Quality grade.
    pub quality_grade: String,

    /// Allergen statement.
    pub allergens: String,

    /// Nutrition facts with derived NRV percentages.
    pub nutrition: NutritionPanel,

    /// Warning line.
    pub warning: String,

    /// Irradiation notice.
    pub irradiated: String,

    /// EAN-13 commodity barcode.
    pub commodity_barcode: String,
}

impl FoodLabelRecord {
    /// Serialized keys, in output order.
    pub const FIELD_NAMES: [&'static str; 18] = [
        "name",
        "ingredients",
        "netContent",
        "specification",
        "producer",
        "address",
        "contactInfo",
        "productionDate",
        "shelfLife",
        "storageConditions",
        "foodProductionLicenseNumber",
        "productStandardCode",
        "qualityGrade",
        "allergens",
        "nutrition",
        "warning",
        "irradiated",
        "commodityBarcode",
    ];

    /// Look up a string field by its serialized key.
    ///
    /// Returns `None` for unknown keys and for `nutrition`, which is not a
    /// string.
    pub fn field(&self, key: &str) -> Option<&str> {
        let value = match key {
            "name" => &self.name,
            "ingredients" => &self.ingredients,
            "netContent" => &self.net_content,
            "specification" => &self.specification,
            "producer" => &self.producer,
            "address" => &self.address,
            "contactInfo" => &self.contact_info,
            "productionDate" => &self.production_date,
            "shelfLife" => &self.shelf_life,
            "storageConditions" => &self.storage_conditions,
            "foodProductionLicenseNumber" => &self.food_production_license_number,
            "productStandardCode" => &self.product_standard_code,
            "qualityGrade" => &self.quality_grade,
            "allergens" => &self.allergens,
            "warning" => &self.warning,
            "irradiated" => &self.irradiated,
            "commodityBarcode" => &self.commodity_barcode,
            _ => return None,
        };
        Some(value.as_str())
    }

    /// True when no field at all was recognized.
    pub fn is_empty(&self) -> bool {
        self.nutrition.is_empty()
            && Self::FIELD_NAMES
                .iter()
                .filter_map(|key| self.field(key))
                .all(str::is_empty)
    }
}

/// The six core nutrients of a Chinese nutrition facts table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Nutrient {
    Energy,
    Protein,
    Fat,
    Carbohydrate,
    Sugar,
    Sodium,
}

impl Nutrient {
    /// All nutrients in table order.
    pub const ALL: [Nutrient; 6] = [
        Nutrient::Energy,
        Nutrient::Protein,
        Nutrient::Fat,
        Nutrient::Carbohydrate,
        Nutrient::Sugar,
        Nutrient::Sodium,
    ];

    /// Key used in the serialized panel.
    pub fn key(&self) -> &'static str {
        match self {
            Nutrient::Energy => "energy",
            Nutrient::Protein => "protein",
            Nutrient::Fat => "fat",
            Nutrient::Carbohydrate => "carbohydrate",
            Nutrient::Sugar => "sugar",
            Nutrient::Sodium => "sodium",
        }
    }

    /// Label as printed on the package.
    pub fn label(&self) -> &'static str {
        match self {
            Nutrient::Energy => "能量",
            Nutrient::Protein => "蛋白质",
            Nutrient::Fat => "脂肪",
            Nutrient::Carbohydrate => "碳水化合物",
            Nutrient::Sugar => "糖",
            Nutrient::Sodium => "钠",
        }
    }
}

/// Nutrition facts: "value+unit" strings plus derived NRV percentages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NutritionPanel {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub energy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protein: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fat: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carbohydrate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sugar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sodium: Option<String>,

    #[serde(rename = "energyNRV", skip_serializing_if = "Option::is_none")]
    pub energy_nrv: Option<String>,
    #[serde(rename = "proteinNRV", skip_serializing_if = "Option::is_none")]
    pub protein_nrv: Option<String>,
    #[serde(rename = "fatNRV", skip_serializing_if = "Option::is_none")]
    pub fat_nrv: Option<String>,
    #[serde(rename = "carbohydrateNRV", skip_serializing_if = "Option::is_none")]
    pub carbohydrate_nrv: Option<String>,
    #[serde(rename = "sugarNRV", skip_serializing_if = "Option::is_none")]
    pub sugar_nrv: Option<String>,
    #[serde(rename = "sodiumNRV", skip_serializing_if = "Option::is_none")]
    pub sodium_nrv: Option<String>,
}

impl NutritionPanel {
    fn value_slot(&mut self, nutrient: Nutrient) -> &mut Option<String> {
        match nutrient {
            Nutrient::Energy => &mut self.energy,
            Nutrient::Protein => &mut self.protein,
            Nutrient::Fat => &mut self.fat,
            Nutrient::Carbohydrate => &mut self.carbohydrate,
            Nutrient::Sugar => &mut self.sugar,
            Nutrient::Sodium => &mut self.sodium,
        }
    }

    fn nrv_slot(&mut self, nutrient: Nutrient) -> &mut Option<String> {
        match nutrient {
            Nutrient::Energy => &mut self.energy_nrv,
            Nutrient::Protein => &mut self.protein_nrv,
            Nutrient::Fat => &mut self.fat_nrv,
            Nutrient::Carbohydrate => &mut self.carbohydrate_nrv,
            Nutrient::Sugar => &mut self.sugar_nrv,
            Nutrient::Sodium => &mut self.sodium_nrv,
        }
    }

    /// Formatted value of a nutrient, e.g. "10.2g".
    pub fn get(&self, nutrient: Nutrient) -> Option<&str> {
        match nutrient {
            Nutrient::Energy => self.energy.as_deref(),
            Nutrient::Protein => self.protein.as_deref(),
            Nutrient::Fat => self.fat.as_deref(),
            Nutrient::Carbohydrate => self.carbohydrate.as_deref(),
            Nutrient::Sugar => self.sugar.as_deref(),
            Nutrient::Sodium => self.sodium.as_deref(),
        }
    }

    /// NRV percentage of a nutrient, e.g. "17%".
    pub fn nrv(&self, nutrient: Nutrient) -> Option<&str> {
        match nutrient {
            Nutrient::Energy => self.energy_nrv.as_deref(),
            Nutrient::Protein => self.protein_nrv.as_deref(),
            Nutrient::Fat => self.fat_nrv.as_deref(),
            Nutrient::Carbohydrate => self.carbohydrate_nrv.as_deref(),
            Nutrient::Sugar => self.sugar_nrv.as_deref(),
            Nutrient::Sodium => self.sodium_nrv.as_deref(),
        }
    }

    pub fn set(&mut self, nutrient: Nutrient, value: impl Into<String>) {
        *self.value_slot(nutrient) = Some(value.into());
    }

    pub fn set_nrv(&mut self, nutrient: Nutrient, percent: impl Into<String>) {
        *self.nrv_slot(nutrient) = Some(percent.into());
    }

    /// Nutrients that carry a value, in table order.
    pub fn present(&self) -> impl Iterator<Item = (Nutrient, &str)> + '_ {
        Nutrient::ALL
            .into_iter()
            .filter_map(move |n| self.get(n).map(|v| (n, v)))
    }

    /// True when no nutrient value was recognized.
    pub fn is_empty(&self) -> bool {
        self.present().next().is_none()
    }
}
