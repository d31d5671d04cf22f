//! Configuration structures for the food label pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for the foodlabel pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    /// OCR configuration.
    pub ocr: OcrConfig,

    /// Image preparation configuration.
    pub image: ImageConfig,

    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Model configuration.
    pub models: ModelConfig,

    /// Remote image fetching configuration.
    pub fetch: FetchConfig,
}

/// Which OCR engine backs a recognition request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineKind {
    /// PaddleOCR models through `pure-onnx-ocr`.
    Paddle,
    /// The `tesseract` command line tool.
    Tesseract,
    /// Canned lines from a fixture file.
    Fixture,
}

impl std::fmt::Display for EngineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineKind::Paddle => write!(f, "paddle"),
            EngineKind::Tesseract => write!(f, "tesseract"),
            EngineKind::Fixture => write!(f, "fixture"),
        }
    }
}

/// OCR engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Engine used when none is given on the command line.
    pub engine: EngineKind,

    /// Lines at or below this confidence never reach the extractors.
    pub min_confidence: f32,

    /// Tesseract language list (e.g. "chi_sim+eng").
    pub tesseract_languages: String,

    /// Tesseract page segmentation mode.
    pub tesseract_psm: u32,

    /// Keep `[UNK]` tokens emitted by the recognizer instead of blanking them.
    pub keep_unk: bool,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            engine: EngineKind::Paddle,
            min_confidence: 0.1,
            tesseract_languages: "chi_sim+eng".to_string(),
            tesseract_psm: 6,
            keep_unk: false,
        }
    }
}

/// Image preparation applied before OCR.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageConfig {
    /// Longest allowed side in pixels; larger images are shrunk.
    pub max_side: u32,

    /// JPEG quality used when re-encoding.
    pub jpeg_quality: u8,

    /// Skip preparation and hand the raw bytes to the engine.
    pub passthrough: bool,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            max_side: 2048,
            jpeg_quality: 85,
            passthrough: false,
        }
    }
}

/// Field extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Compute NRV percentages for recognized nutrients.
    pub compute_nrv: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self { compute_nrv: true }
    }
}

/// Model file locations for the primary engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Directory containing model files. Empty means the platform data dir.
    pub model_dir: PathBuf,

    /// Text detection model file name.
    pub detection_model: String,

    /// Text recognition model file name.
    pub recognition_model: String,

    /// Character dictionary file name.
    pub dictionary: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::new(),
            detection_model: "det.onnx".to_string(),
            recognition_model: "ch_rec.onnx".to_string(),
            dictionary: "ch_dict.txt".to_string(),
        }
    }
}

/// Remote image fetching limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    pub timeout_secs: u64,

    /// Largest accepted image body in bytes.
    pub max_bytes: u64,

    /// User-Agent header sent with the request.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            max_bytes: 10 * 1024 * 1024,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".to_string(),
        }
    }
}

impl LabelConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }

    /// Get full path to a model file.
    pub fn model_path(&self, model_name: &str) -> PathBuf {
        self.models.model_dir.join(model_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: LabelConfig =
            serde_json::from_str(r#"{"ocr": {"engine": "tesseract"}}"#).unwrap();

        assert_eq!(config.ocr.engine, EngineKind::Tesseract);
        assert_eq!(config.ocr.min_confidence, 0.1);
        assert_eq!(config.image.max_side, 2048);
        assert_eq!(config.fetch.max_bytes, 10 * 1024 * 1024);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = LabelConfig::default();
        config.image.jpeg_quality = 70;
        config.save(&path).unwrap();

        let loaded = LabelConfig::from_file(&path).unwrap();
        assert_eq!(loaded.image.jpeg_quality, 70);
        assert_eq!(loaded.ocr.engine, EngineKind::Paddle);
    }
}
