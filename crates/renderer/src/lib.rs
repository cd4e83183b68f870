//! Image conversion for orthophoto display.
//!
//! Converts a decoded raster into a PNG suitable for a web map overlay:
//! - Background (pure white) pixels become fully transparent
//! - Images that already carry alpha are re-encoded untouched
//! - Thumbnails for quick previews

pub mod alpha;
pub mod convert;
pub mod thumbnail;

pub use alpha::mask_white_pixels;
pub use convert::{convert_to_png, ConversionError, ConversionOutcome};
pub use thumbnail::{thumbnail_png, ThumbnailSize};
