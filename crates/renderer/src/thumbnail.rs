//! Downscaled PNG previews of converted orthophotos.

use std::io::Cursor;
use std::path::Path;
use std::str::FromStr;

use image::imageops::FilterType;
use image::ImageOutputFormat;

use crate::convert::{decode, ConversionError};

/// Preview sizes offered to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThumbnailSize {
    Small,
    Medium,
}

impl ThumbnailSize {
    /// Target width in pixels; height follows the aspect ratio.
    pub fn width(&self) -> u32 {
        match self {
            ThumbnailSize::Small => 200,
            ThumbnailSize::Medium => 500,
        }
    }
}

impl FromStr for ThumbnailSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "small" => Ok(ThumbnailSize::Small),
            "medium" => Ok(ThumbnailSize::Medium),
            other => Err(format!("unknown size '{}', expected 'small' or 'medium'", other)),
        }
    }
}

/// Decode `path` and return a PNG scaled to the requested width.
///
/// PNG keeps the transparency produced by the converter.
pub fn thumbnail_png(path: impl AsRef<Path>, size: ThumbnailSize) -> Result<Vec<u8>, ConversionError> {
    let img = decode(path.as_ref())?;
    let resized = img.resize(size.width(), u32::MAX, FilterType::Triangle);

    let mut buf = Cursor::new(Vec::new());
    resized
        .write_to(&mut buf, ImageOutputFormat::Png)
        .map_err(ConversionError::Encode)?;
    Ok(buf.into_inner())
}
