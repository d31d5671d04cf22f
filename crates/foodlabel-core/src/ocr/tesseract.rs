//! Alternate engine: the `tesseract` command line tool in TSV mode.

use std::io::Write;
use std::process::Command;

use tracing::{debug, info};

use crate::error::OcrError;
use crate::models::config::OcrConfig;

use super::{OcrLine, OcrRecognizer};

/// Recognizer that shells out to `tesseract`.
pub struct TesseractRecognizer {
    languages: String,
    psm: u32,
    binary: String,
}

impl TesseractRecognizer {
    pub fn new(config: &OcrConfig) -> Self {
        Self {
            languages: config.tesseract_languages.clone(),
            psm: config.tesseract_psm,
            binary: "tesseract".to_string(),
        }
    }

    /// Use a specific tesseract executable.
    pub fn with_binary(mut self, binary: impl Into<String>) -> Self {
        self.binary = binary.into();
        self
    }

    /// Query the installed version, failing if the binary is missing.
    pub fn version(&self) -> Result<String, OcrError> {
        let output = Command::new(&self.binary)
            .arg("--version")
            .output()
            .map_err(|e| OcrError::Unavailable(format!("failed to run {}: {}", self.binary, e)))?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(stdout.lines().next().unwrap_or("").trim().to_string())
    }

    fn run_tsv(&self, path: &std::path::Path) -> Result<String, OcrError> {
        let output = Command::new(&self.binary)
            .arg(path)
            .arg("stdout")
            .arg("-l")
            .arg(&self.languages)
            .arg("--psm")
            .arg(self.psm.to_string())
            .arg("tsv")
            .output()
            .map_err(|e| {
                OcrError::Unavailable(format!("failed to run {} (is it installed?): {}", self.binary, e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(OcrError::Recognition(format!("tesseract failed: {}", stderr.trim())));
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

impl OcrRecognizer for TesseractRecognizer {
    fn name(&self) -> &str {
        "tesseract"
    }

    fn recognize(&self, image: &[u8]) -> Result<Vec<OcrLine>, OcrError> {
        let mut file = tempfile::Builder::new()
            .prefix("foodlabel-")
            .tempfile()
            .map_err(|e| OcrError::Recognition(format!("failed to create temp file: {}", e)))?;
        file.write_all(image)
            .and_then(|_| file.flush())
            .map_err(|e| OcrError::Recognition(format!("failed to write temp image: {}", e)))?;

        debug!("Running tesseract on {} bytes ({})", image.len(), self.languages);
        let tsv = self.run_tsv(file.path())?;
        let lines = parse_tsv(&tsv);

        info!("tesseract returned {} lines", lines.len());
        Ok(lines)
    }
}

/// Group TSV word rows into lines.
///
/// Rows are keyed by (page, block, paragraph, line); a line's confidence
/// is the mean of its word confidences scaled to 0..1.
fn parse_tsv(tsv: &str) -> Vec<OcrLine> {
    let mut lines = Vec::new();
    let mut current_key: Option<(u32, u32, u32, u32)> = None;
    let mut words: Vec<(String, f32)> = Vec::new();

    for row in tsv.lines().skip(1) {
        let cols: Vec<&str> = row.split('\t').collect();
        if cols.len() < 12 || cols[0] != "5" {
            continue;
        }

        let text = cols[11].trim();
        let conf: f32 = cols[10].parse().unwrap_or(-1.0);
        if text.is_empty() || conf < 0.0 {
            continue;
        }

        let key = (
            cols[1].parse().unwrap_or(0),
            cols[2].parse().unwrap_or(0),
            cols[3].parse().unwrap_or(0),
            cols[4].parse().unwrap_or(0),
        );

        if current_key != Some(key) {
            if let Some(line) = finish_line(&mut words) {
                lines.push(line);
            }
            current_key = Some(key);
        }
        words.push((text.to_string(), conf));
    }

    if let Some(line) = finish_line(&mut words) {
        lines.push(line);
    }

    lines
}

fn finish_line(words: &mut Vec<(String, f32)>) -> Option<OcrLine> {
    if words.is_empty() {
        return None;
    }

    let mut text = String::new();
    for (word, _) in words.iter() {
        let needs_space = match (text.chars().last(), word.chars().next()) {
            (Some(prev), Some(next)) => prev.is_ascii_alphanumeric() && next.is_ascii_alphanumeric(),
            _ => false,
        };
        if needs_space {
            text.push(' ');
        }
        text.push_str(word);
    }

    let confidence = words.iter().map(|(_, c)| c).sum::<f32>() / words.len() as f32 / 100.0;
    words.clear();

    Some(OcrLine::new(text, confidence.clamp(0.0, 1.0)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "level\tpage_num\tblock_num\tpar_num\tline_num\tword_num\tleft\ttop\twidth\theight\tconf\ttext";

    #[test]
    fn test_parse_tsv_groups_words_into_lines() {
        let tsv = format!(
            "{HEADER}\n\
             4\t1\t1\t1\t1\t0\t0\t0\t100\t20\t-1\t\n\
             5\t1\t1\t1\t1\t1\t0\t0\t40\t20\t90\t净含量：\n\
             5\t1\t1\t1\t1\t2\t40\t0\t40\t20\t80\t400g\n\
             5\t1\t1\t1\t2\t1\t0\t30\t40\t20\t70\tNet\n\
             5\t1\t1\t1\t2\t2\t40\t30\t40\t20\t50\tWt\n"
        );

        let lines = parse_tsv(&tsv);

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text, "净含量：400g");
        assert!((lines[0].confidence - 0.85).abs() < 1e-6);
        assert_eq!(lines[1].text, "Net Wt");
        assert!((lines[1].confidence - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_parse_tsv_skips_empty_and_negative_rows() {
        let tsv = format!("{HEADER}\n5\t1\t1\t1\t1\t1\t0\t0\t1\t1\t-1\t \n");
        assert!(parse_tsv(&tsv).is_empty());
    }

    #[test]
    fn test_missing_binary_is_unavailable() {
        let recognizer = TesseractRecognizer::new(&OcrConfig::default())
            .with_binary("foodlabel-no-such-tesseract");

        let err = recognizer.recognize(b"\xff\xd8").unwrap_err();
        assert!(matches!(err, OcrError::Unavailable(_)));
    }
}
