// Upload normalization: decode, convert, downscale, re-encode

use super::models::OutputFormat;
use image::imageops::FilterType;
use image::{ColorType, DynamicImage, GenericImageView, ImageFormat};
use std::io::Cursor;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("Image data is empty")]
    EmptyData,

    #[error("Unsupported image format")]
    UnsupportedFormat,

    #[error("Failed to decode image: {0}")]
    DecodeFailed(String),

    #[error("Failed to encode image: {0}")]
    EncodeFailed(String),
}

impl ImageError {
    /// Whether the failure was caused by what the client uploaded.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, ImageError::EncodeFailed(_))
    }
}

/// An upload after normalization, ready to forward
#[derive(Debug, Clone)]
pub struct NormalizedImage {
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub format: OutputFormat,
    /// Whether the source exceeded the cap and was downscaled
    pub resized: bool,
}

/// Dimensions an image of `width`×`height` ends up with under a `max_dimension` cap.
///
/// Images within the cap keep their size. Larger ones are scaled so the longer
/// side equals the cap exactly; the shorter side is rounded and never drops
/// below one pixel.
pub fn target_dimensions(width: u32, height: u32, max_dimension: u32) -> (u32, u32) {
    if width <= max_dimension && height <= max_dimension {
        return (width, height);
    }

    let scale_side = |side: u32, longest: u32| -> u32 {
        let scaled = (side as f64 * max_dimension as f64 / longest as f64).round() as u32;
        scaled.clamp(1, max_dimension)
    };

    if width >= height {
        (max_dimension, scale_side(height, width))
    } else {
        (scale_side(width, height), max_dimension)
    }
}

/// Normalize raw upload bytes into the canonical `format`.
///
/// The decoded pixels are converted to RGBA8 when the source encoding differs
/// from the canonical one (or the canonical encoder cannot take the source
/// layout as-is), downscaled with Lanczos3 when either side exceeds
/// `max_dimension`, and re-encoded.
pub fn normalize_image(
    bytes: &[u8],
    format: OutputFormat,
    max_dimension: u32,
) -> Result<NormalizedImage, ImageError> {
    if bytes.is_empty() {
        return Err(ImageError::EmptyData);
    }

    let source_format = image::guess_format(bytes).map_err(|_| ImageError::UnsupportedFormat)?;
    let mut img = image::load_from_memory_with_format(bytes, source_format)
        .map_err(|e| ImageError::DecodeFailed(e.to_string()))?;

    if needs_conversion(source_format, img.color(), format) {
        img = DynamicImage::ImageRgba8(img.to_rgba8());
    }

    let (width, height) = img.dimensions();
    let (target_w, target_h) = target_dimensions(width, height, max_dimension);
    let resized = (target_w, target_h) != (width, height);
    if resized {
        img = img.resize_exact(target_w, target_h, FilterType::Lanczos3);
    }

    let mut encoded = Vec::new();
    img.write_to(&mut Cursor::new(&mut encoded), format.image_format())
        .map_err(|e| ImageError::EncodeFailed(e.to_string()))?;

    Ok(NormalizedImage {
        bytes: encoded,
        width: target_w,
        height: target_h,
        format,
        resized,
    })
}

fn needs_conversion(source: ImageFormat, color: ColorType, target: OutputFormat) -> bool {
    if source != target.image_format() {
        return true;
    }
    // The WebP encoder only takes 8-bit RGB(A)
    target == OutputFormat::Webp && !matches!(color, ColorType::Rgb8 | ColorType::Rgba8)
}
