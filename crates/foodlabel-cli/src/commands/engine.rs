//! OCR engine selection shared by the image commands.

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use tracing::{debug, info};

use foodlabel_core::models::config::{EngineKind, LabelConfig};
use foodlabel_core::{FixtureRecognizer, OcrRecognizer, PaddleRecognizer, TesseractRecognizer};

use super::models::resolve_model_dir;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum EngineChoice {
    /// PaddleOCR models (pure Rust ONNX)
    Paddle,
    /// The tesseract command line tool
    Tesseract,
    /// Canned lines from --fixture
    Fixture,
}

impl From<EngineChoice> for EngineKind {
    fn from(choice: EngineChoice) -> Self {
        match choice {
            EngineChoice::Paddle => EngineKind::Paddle,
            EngineChoice::Tesseract => EngineKind::Tesseract,
            EngineChoice::Fixture => EngineKind::Fixture,
        }
    }
}

/// Engine options accepted by `process` and `batch`.
#[derive(Args, Debug, Default)]
pub struct EngineArgs {
    /// OCR engine (default: from config)
    #[arg(short, long, value_enum)]
    engine: Option<EngineChoice>,

    /// Fixture file with OCR lines (JSON array or plain text); implies --engine fixture
    #[arg(long)]
    fixture: Option<PathBuf>,

    /// Model directory for the paddle engine
    #[arg(short, long)]
    model_dir: Option<PathBuf>,
}

impl EngineArgs {
    /// The engine these options select.
    pub fn kind(&self, config: &LabelConfig) -> EngineKind {
        match (self.engine, &self.fixture) {
            (Some(choice), _) => choice.into(),
            (None, Some(_)) => EngineKind::Fixture,
            (None, None) => config.ocr.engine,
        }
    }

    /// Construct the selected engine.
    pub fn build(&self, config: &LabelConfig) -> anyhow::Result<Box<dyn OcrRecognizer>> {
        let kind = self.kind(config);
        info!("Using {} OCR engine", kind);

        let recognizer: Box<dyn OcrRecognizer> = match kind {
            EngineKind::Fixture => {
                let Some(path) = &self.fixture else {
                    anyhow::bail!("The fixture engine needs --fixture <file>");
                };
                Box::new(FixtureRecognizer::from_file(path)?)
            }
            EngineKind::Tesseract => Box::new(TesseractRecognizer::new(&config.ocr)),
            EngineKind::Paddle => {
                let model_dir = resolve_model_dir(config, self.model_dir.as_deref());
                debug!("Loading models from {}", model_dir.display());

                let engine = PaddleRecognizer::from_dir(&model_dir, &config.models, &config.ocr)
                    .map_err(|e| {
                        anyhow::anyhow!(
                            "{}\n\nRun 'foodlabel models status' to check the model files, \
                             or pass --engine tesseract.",
                            e
                        )
                    })?;
                Box::new(engine)
            }
        };

        Ok(recognizer)
    }
}
