//! Error types for the foodlabel-core library.
//!
//! Field extraction has no error type of its own: a field that cannot be
//! recognized is an ordinary `None`, never a failure.

use thiserror::Error;

/// Main error type for the foodlabel library.
#[derive(Error, Debug)]
pub enum LabelError {
    /// OCR processing error.
    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    /// Image decoding or encoding error.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Fetching the source image failed.
    #[error("image download failed: {0}")]
    Fetch(String),
}

/// Errors related to OCR processing.
#[derive(Error, Debug)]
pub enum OcrError {
    /// Failed to load OCR models.
    #[error("failed to load model: {0}")]
    ModelLoad(String),

    /// Text recognition failed.
    #[error("text recognition failed: {0}")]
    Recognition(String),

    /// Invalid image format or dimensions.
    #[error("invalid image: {0}")]
    InvalidImage(String),

    /// The engine binary or runtime is not available on this host.
    #[error("OCR engine unavailable: {0}")]
    Unavailable(String),
}

/// Result type for the foodlabel library.
pub type Result<T> = std::result::Result<T, LabelError>;
