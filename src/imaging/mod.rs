//! Image normalization for uploads bound for the provider.
//!
//! Browsers send whatever the user picked: JPEG photos straight off a phone,
//! palette PNGs from a canvas export, oversized WEBP screenshots. Before an
//! image or mask is forwarded it is decoded, converted to a canonical pixel
//! layout, capped to a maximum side length and re-encoded.
//!
//! # Submodules
//!
//! - `models`: Output formats and upload extension rules.
//! - `normalize`: The pure bytes-in/bytes-out normalization transform.

pub mod models;
pub mod normalize;

pub use models::{is_allowed_extension, OutputFormat, ALLOWED_EXTENSIONS, DEFAULT_MAX_DIMENSION};
pub use normalize::{normalize_image, target_dimensions, ImageError, NormalizedImage};
