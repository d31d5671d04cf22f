//! Regex patterns for Chinese food label extraction.
//!
//! Lists are ordered: extractors try them front to back and the first match
//! wins. Reordering changes output on labels where several patterns apply.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Food name (食品名称 / 产品名称)
    pub static ref NAME_LABEL: Regex = Regex::new(r"[名称][:：]\s*(.+)").unwrap();

    // Ingredients (配料表 / 成分 / 原料)
    pub static ref INGREDIENTS_LABEL: Regex = Regex::new(r"[配料表成分原][:：]\s*(.+)").unwrap();

    // Net content
    pub static ref NET_CONTENT_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"净含量[:：]\s*(\d+\.?\d*)\s*(千克|毫升|克|升|kg|KG|Kg|g|G|ml|mL|ML|L)").unwrap(),
        Regex::new(r"净含量[:：]\s*(\d+\.?\d*)\s*([克千毫升]+)").unwrap(),
        Regex::new(r"(\d+\.?\d*)\s*[克gG][克gG]?\s*/\s*[袋瓶盒包箱]").unwrap(),
    ];

    // Specification (规格)
    pub static ref SPECIFICATION_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"规格[:：]\s*([^\n]+)").unwrap(),
        Regex::new(r"(\d+[\x{4e00}-\x{9fa5}]/[\x{4e00}-\x{9fa5}]+)").unwrap(),
        Regex::new(r"(\d+)[克gG]/[盒瓶包袋]").unwrap(),
    ];

    // Producer, in keyword priority order
    pub static ref PRODUCER_PATTERNS: Vec<Regex> = ["生产商", "生产厂家", "制造商", "委托生产企业", "生产者"]
        .iter()
        .map(|kw| Regex::new(&format!(r"{kw}[:：]\s*(.+?)(?:\n|地址|电话|$)")).unwrap())
        .collect();

    // Address
    pub static ref ADDRESS_LABEL: Regex = Regex::new(r"地址[:：]\s*(.+)").unwrap();

    // Contact information
    pub static ref CONTACT_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"电话[:：]\s*(\d{3,4}[-\s]?\d{7,8})").unwrap(),
        Regex::new(r"联系方式[:：]\s*([^\n]+)").unwrap(),
        Regex::new(r"(\d{3,4}[-\s]?\d{7,8})").unwrap(),
    ];

    // Production date: 2025-04-20, 2025/4/20, 2025年4月20日, 2025.04.20
    pub static ref PRODUCTION_DATE_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"生产日期[:：]\s*(\d{4}[-/年]\d{1,2}[-/月]\d{1,2}日?)").unwrap(),
        Regex::new(r"生产日期[:：]\s*(\d{4}\.\d{1,2}\.\d{1,2})").unwrap(),
        Regex::new(r"(见封口|见瓶身|见包装)").unwrap(),
    ];

    // Shelf life
    pub static ref SHELF_LIFE_QUANTITY: Regex =
        Regex::new(r"保质期[:：]\s*(\d+)\s*(个月|个|月|天|年|周)").unwrap();
    pub static ref SHELF_LIFE_LINE: Regex = Regex::new(r"保质期[:：]\s*([^\n]+)").unwrap();

    // Food production license
    pub static ref LICENSE_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"(SC[12]\d{13})").unwrap(),
        Regex::new(r"(QS\d{12})").unwrap(),
        Regex::new(r"生产许可证编号[:：]\s*(SC\d+)").unwrap(),
        Regex::new(r"(SC\d{12,13})").unwrap(),
    ];

    // Product standard code
    pub static ref STANDARD_CODE_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"产品标准代号[:：]\s*([A-Z]{1,2}/T\s*\d+(?:\.\d+)?)").unwrap(),
        Regex::new(r"(GB\s*/?\s*T\s*\d+(?:\.\d+)?)").unwrap(),
        Regex::new(r"(QB\s*/?\s*\d+(?:\.\d+)?)").unwrap(),
        Regex::new(r"([A-Z]{1,2}/T\s*\d+(?:\.\d+)?)").unwrap(),
    ];

    // Quality grade
    pub static ref QUALITY_GRADE_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"质量等级[:：]\s*([^\n]+)").unwrap(),
        Regex::new(r"等级[:：]\s*([一二三四特优]+等)").unwrap(),
        Regex::new(r"([一二三四特优]+等品)").unwrap(),
    ];

    // Allergen statement
    pub static ref ALLERGEN_CLAUSE: Regex =
        Regex::new(r"(?:致敏物质|过敏原|含有)[:：]?\s*([^\n]+)").unwrap();

    // Commodity barcode (China GS1 prefix 69)
    pub static ref BARCODE_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"条码[:：]\s*(\d{13})").unwrap(),
        Regex::new(r"(69\d{11})").unwrap(),
    ];

    // Nutrition facts, inline "label value unit"
    pub static ref ENERGY_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"能量[:：\s]*(\d+\.?\d*)\s*((?i:kj|kcal)|千焦|千卡)").unwrap(),
        Regex::new(r"能量\s*(\d+\.?\d*)\s*(千焦|(?i:kj))").unwrap(),
    ];
    pub static ref PROTEIN_PATTERNS: Vec<Regex> =
        vec![Regex::new(r"蛋白质[:：\s]*(\d+\.?\d*)\s*(g|克)").unwrap()];
    pub static ref FAT_PATTERNS: Vec<Regex> =
        vec![Regex::new(r"脂肪[:：\s]*(\d+\.?\d*)\s*(g|克)").unwrap()];
    pub static ref CARBOHYDRATE_PATTERNS: Vec<Regex> =
        vec![Regex::new(r"碳水化合物[:：\s]*(\d+\.?\d*)\s*(g|克)").unwrap()];
    pub static ref SUGAR_PATTERNS: Vec<Regex> =
        vec![Regex::new(r"糖[:：\s]*(\d+\.?\d*)\s*(g|克)").unwrap()];
    pub static ref SODIUM_PATTERNS: Vec<Regex> =
        vec![Regex::new(r"钠[:：\s]*(\d+\.?\d*)\s*(mg|毫克)").unwrap()];

    // Leading number of a formatted nutrient value
    pub static ref LEADING_NUMBER: Regex = Regex::new(r"(\d+\.?\d*)").unwrap();

    // Energy reported in kilocalories
    pub static ref KCAL_UNIT: Regex = Regex::new(r"(?i:kcal)|千卡").unwrap();
}

/// Table-row pattern for one nutrient: label, number, then any unit token.
pub fn nutrient_row_pattern(label: &str) -> Regex {
    Regex::new(&format!(
        r"{label}[:：\s]*(\d+\.?\d*)\s*([a-zA-Z\x{{4e00}}-\x{{9fa5}}]+)"
    ))
    .unwrap()
}

/// Labels that open a field of their own; a multi-line value stops there.
pub const FIELD_LABELS: &[&str] = &[
    "净含量", "规格", "生产", "地址", "厂址", "电话", "保质期", "贮存", "许可证", "产品标准",
    "营养", "条码",
];

/// Words that mark a storage instruction line.
pub const STORAGE_KEYWORDS: &[&str] = &["贮存", "保存", "储藏", "存放"];

/// Words that end a storage instruction continuation.
pub const STORAGE_STOP_WORDS: &[&str] = &["生产", "厂址", "电话"];

/// Words that mark a warning line.
pub const WARNING_KEYWORDS: &[&str] = &["警示", "注意", "警告"];

/// Allergen triggers, in scan order.
pub const ALLERGEN_KEYWORDS: &[&str] = &[
    "含有", "过敏", "致敏物质", "过敏原", "花生", "坚果", "牛奶", "乳制品", "鸡蛋", "大豆", "小麦",
    "鱼类", "甲壳类", "芝麻",
];
