//! Output formatting for recognition responses.

use foodlabel_core::{FoodLabelRecord, Nutrient, RecognitionResponse};

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON response
    Json,
    /// CSV row with a header
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

pub fn format_response(response: &RecognitionResponse, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(response)?),
        OutputFormat::Csv => format_csv(response),
        OutputFormat::Text => Ok(format_text(response)),
    }
}

fn format_csv(response: &RecognitionResponse) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    let mut header: Vec<&str> = FoodLabelRecord::FIELD_NAMES.to_vec();
    header.extend(["success", "error", "processingTime"]);
    wtr.write_record(&header)?;

    let record = response.data.clone().unwrap_or_default();
    let mut row: Vec<String> = FoodLabelRecord::FIELD_NAMES
        .iter()
        .map(|key| match record.field(key) {
            Some(value) => Ok(value.to_string()),
            None => serde_json::to_string(&record.nutrition),
        })
        .collect::<Result<_, _>>()?;
    row.push(response.success.to_string());
    row.push(response.error.clone().unwrap_or_default());
    row.push(format!("{:.3}", response.processing_time));
    wtr.write_record(&row)?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

const TEXT_LABELS: [(&str, &str); 17] = [
    ("name", "食品名称"),
    ("ingredients", "配料"),
    ("netContent", "净含量"),
    ("specification", "规格"),
    ("producer", "生产商"),
    ("address", "地址"),
    ("contactInfo", "联系方式"),
    ("productionDate", "生产日期"),
    ("shelfLife", "保质期"),
    ("storageConditions", "贮存条件"),
    ("foodProductionLicenseNumber", "生产许可证"),
    ("productStandardCode", "产品标准代号"),
    ("qualityGrade", "质量等级"),
    ("allergens", "致敏物质"),
    ("warning", "警示"),
    ("irradiated", "辐照"),
    ("commodityBarcode", "条码"),
];

fn format_text(response: &RecognitionResponse) -> String {
    let mut output = String::new();

    let Some(record) = &response.data else {
        output.push_str(&format!(
            "Recognition failed: {}\n",
            response.error.as_deref().unwrap_or("unknown error")
        ));
        output.push_str(&format!("Time: {:.3}s\n", response.processing_time));
        return output;
    };

    for (key, label) in TEXT_LABELS {
        let value = record.field(key).unwrap_or_default();
        if !value.is_empty() {
            output.push_str(&format!("{}: {}\n", label, value));
        }
    }

    if !record.nutrition.is_empty() {
        output.push_str("\n营养成分:\n");
        for (nutrient, value) in record.nutrition.present() {
            match record.nutrition.nrv(nutrient) {
                Some(nrv) => output.push_str(&format!("  {} {} (NRV {})\n", nutrient.label(), value, nrv)),
                None => output.push_str(&format!("  {} {}\n", nutrient.label(), value)),
            }
        }
    }

    if record.is_empty() {
        output.push_str("No label fields recognized\n");
    }

    output.push_str(&format!("\nTime: {:.3}s\n", response.processing_time));
    output
}

/// Short one-line description used in batch progress output.
pub fn describe(record: &FoodLabelRecord) -> String {
    let found = FoodLabelRecord::FIELD_NAMES
        .iter()
        .filter_map(|key| record.field(key))
        .filter(|v| !v.is_empty())
        .count();
    let nutrients = Nutrient::ALL
        .iter()
        .filter(|n| record.nutrition.get(**n).is_some())
        .count();

    format!("{} fields, {} nutrients", found, nutrients)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn sample() -> RecognitionResponse {
        let mut record = FoodLabelRecord {
            name: "全麦吐司面包".to_string(),
            net_content: "400g".to_string(),
            ..Default::default()
        };
        record.nutrition.set(Nutrient::Protein, "10.2g");
        record.nutrition.set_nrv(Nutrient::Protein, "17%");

        RecognitionResponse::ok(record, Duration::from_millis(250))
    }

    #[test]
    fn test_text_output() {
        let text = format_response(&sample(), OutputFormat::Text).unwrap();

        assert!(text.contains("食品名称: 全麦吐司面包"));
        assert!(text.contains("净含量: 400g"));
        assert!(text.contains("蛋白质 10.2g (NRV 17%)"));
        assert!(!text.contains("条码"));
    }

    #[test]
    fn test_csv_output() {
        let csv = format_response(&sample(), OutputFormat::Csv).unwrap();
        let mut lines = csv.lines();

        let header = lines.next().unwrap();
        assert!(header.starts_with("name,ingredients,netContent"));
        assert!(header.ends_with("success,error,processingTime"));

        let row = lines.next().unwrap();
        assert!(row.starts_with("全麦吐司面包,,400g,"));
        assert!(row.ends_with("true,,0.250"));
    }

    #[test]
    fn test_failed_response_text() {
        let failed = RecognitionResponse::failure("image too large", Duration::from_secs(1));
        let text = format_response(&failed, OutputFormat::Text).unwrap();
        assert!(text.contains("Recognition failed: image too large"));
    }

    #[test]
    fn test_describe() {
        let record = sample().data.unwrap();
        assert_eq!(describe(&record), "2 fields, 1 nutrients");
    }
}
