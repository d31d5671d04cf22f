//! Image preparation before OCR.
//!
//! Large photos are shrunk and re-encoded as JPEG so every engine sees a
//! bounded input. Preparation is best effort: bytes that cannot be decoded
//! are passed on untouched and left for the engine to reject.

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{GenericImageView, RgbImage};
use tracing::{debug, warn};

use crate::error::Result;
use crate::models::config::ImageConfig;

/// Container format, as far as the leading magic bytes tell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormatHint {
    Jpeg,
    Png,
    Unknown,
}

impl std::fmt::Display for ImageFormatHint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImageFormatHint::Jpeg => write!(f, "JPEG"),
            ImageFormatHint::Png => write!(f, "PNG"),
            ImageFormatHint::Unknown => write!(f, "unknown"),
        }
    }
}

const JPEG_MAGIC: &[u8] = &[0xFF, 0xD8];
const PNG_MAGIC: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// Report the image container format from its magic bytes.
pub fn sniff_format(bytes: &[u8]) -> ImageFormatHint {
    if bytes.starts_with(PNG_MAGIC) {
        ImageFormatHint::Png
    } else if bytes.starts_with(JPEG_MAGIC) {
        ImageFormatHint::Jpeg
    } else {
        ImageFormatHint::Unknown
    }
}

/// Shrink and re-encode an image for OCR.
///
/// Returns the original bytes when preparation is disabled or fails.
pub fn prepare_image(bytes: &[u8], config: &ImageConfig) -> Vec<u8> {
    if config.passthrough {
        return bytes.to_vec();
    }

    match encode_prepared(bytes, config) {
        Ok(prepared) => prepared,
        Err(e) => {
            warn!("Image preparation failed, using original bytes: {}", e);
            bytes.to_vec()
        }
    }
}

fn encode_prepared(bytes: &[u8], config: &ImageConfig) -> Result<Vec<u8>> {
    let image = image::load_from_memory(bytes)?;
    let (width, height) = image.dimensions();

    let rgb = image.to_rgb8();
    let (new_width, new_height) = fit_within(width, height, config.max_side);
    let rgb: RgbImage = if (new_width, new_height) == (width, height) {
        rgb
    } else {
        debug!(
            "Resizing image {}x{} -> {}x{}",
            width, height, new_width, new_height
        );
        image::imageops::resize(&rgb, new_width, new_height, FilterType::Lanczos3)
    };

    let mut out = Vec::new();
    JpegEncoder::new_with_quality(&mut out, config.jpeg_quality).encode_image(&rgb)?;

    debug!("Prepared image: {} -> {} bytes", bytes.len(), out.len());

    Ok(out)
}

/// Dimensions scaled so the longest side is at most `max_side`.
fn fit_within(width: u32, height: u32, max_side: u32) -> (u32, u32) {
    let longest = width.max(height);
    if max_side == 0 || longest <= max_side {
        return (width, height);
    }

    let scale = max_side as f64 / longest as f64;
    let scaled = |v: u32| ((v as f64 * scale).round() as u32).max(1);
    (scaled(width), scaled(height))
}
