//! Raster to PNG conversion.

use std::path::Path;

use image::io::Limits;
use image::{ColorType, DynamicImage, ImageFormat};
use thiserror::Error;
use tracing::debug;

use crate::alpha::mask_white_pixels;

/// Errors from decoding or encoding an image.
#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to open {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write PNG: {0}")]
    Encode(#[source] image::ImageError),
}

/// What the converter did with the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionOutcome {
    /// Input already had an alpha channel and was re-encoded as is
    AlphaPreserved,
    /// Input had no alpha; white pixels were made transparent
    WhiteMasked { masked_pixels: usize },
}

/// Upper bound on decoder allocations. Orthophotos routinely exceed the
/// `image` crate's 512 MiB default.
pub const MAX_DECODE_BYTES: u64 = 16 * 1024 * 1024 * 1024;

/// Decoder limits for orthophoto-sized rasters: no dimension cap, only the
/// allocation bound.
pub fn decode_limits() -> Limits {
    let mut limits = Limits::default();
    limits.max_image_width = None;
    limits.max_image_height = None;
    limits.max_alloc = Some(MAX_DECODE_BYTES);
    limits
}

/// Decode `path` as a plain image (no georeferencing involved).
pub(crate) fn decode(path: &Path) -> Result<DynamicImage, ConversionError> {
    let mut reader = image::io::Reader::open(path)
        .map_err(|source| ConversionError::Open {
            path: path.display().to_string(),
            source,
        })?
        .with_guessed_format()
        .map_err(|source| ConversionError::Open {
            path: path.display().to_string(),
            source,
        })?;
    reader.limits(decode_limits());

    reader.decode().map_err(|source| ConversionError::Decode {
        path: path.display().to_string(),
        source,
    })
}

/// Convert `input` to a PNG at `output`.
///
/// Images that already have an alpha channel (RGBA or luminance+alpha) are
/// saved without any transparency pass. Everything else is expanded to
/// RGBA8 and pure-white pixels get alpha 0.
pub fn convert_to_png(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
) -> Result<ConversionOutcome, ConversionError> {
    let (input, output) = (input.as_ref(), output.as_ref());
    let img = decode(input)?;

    debug!(
        input = %input.display(),
        color = ?img.color(),
        width = img.width(),
        height = img.height(),
        "Decoded raster for PNG conversion"
    );

    if img.color().has_alpha() {
        png_encodable(img)
            .save_with_format(output, ImageFormat::Png)
            .map_err(ConversionError::Encode)?;
        return Ok(ConversionOutcome::AlphaPreserved);
    }

    let mut rgba = img.to_rgba8();
    let masked_pixels = mask_white_pixels(&mut rgba);
    rgba.save_with_format(output, ImageFormat::Png)
        .map_err(ConversionError::Encode)?;

    Ok(ConversionOutcome::WhiteMasked { masked_pixels })
}

/// PNG has no float samples; widen float images to 16 bits per channel.
fn png_encodable(img: DynamicImage) -> DynamicImage {
    match img.color() {
        ColorType::Rgba32F => DynamicImage::ImageRgba16(img.to_rgba16()),
        ColorType::Rgb32F => DynamicImage::ImageRgb16(img.to_rgb16()),
        _ => img,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayAlphaImage, LumaA, Rgba, RgbaImage};

    #[test]
    fn test_luma_alpha_is_preserved() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("la.png");
        let output = dir.path().join("out.png");

        let la = GrayAlphaImage::from_pixel(2, 2, LumaA([255, 255]));
        la.save(&input).unwrap();

        let outcome = convert_to_png(&input, &output).unwrap();
        assert_eq!(outcome, ConversionOutcome::AlphaPreserved);

        // White stays opaque: no transparency pass on alpha images
        let back = image::open(&output).unwrap();
        assert_eq!(back.color(), ColorType::La8);
        assert_eq!(back.to_luma_alpha8().get_pixel(0, 0).0, [255, 255]);
    }

    #[test]
    fn test_rgba_white_is_not_masked() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("rgba.png");
        let output = dir.path().join("out.png");

        RgbaImage::from_pixel(3, 3, Rgba([255, 255, 255, 255]))
            .save(&input)
            .unwrap();

        convert_to_png(&input, &output).unwrap();
        let back = image::open(&output).unwrap().to_rgba8();
        assert!(back.pixels().all(|p| p.0 == [255, 255, 255, 255]));
    }

    #[test]
    fn test_decode_limits_admit_large_orthophoto() {
        // 11600 x 11600 RGBA8 is about 538 MB, over the default budget
        let bytes = 11600u64 * 11600 * 4;
        assert!(Limits::default().reserve(bytes).is_err());

        let mut limits = decode_limits();
        assert!(limits.check_dimensions(11600, 11600).is_ok());
        assert!(limits.check_dimensions(60000, 60000).is_ok());
        assert!(limits.reserve(bytes).is_ok());
        assert!(limits.reserve(MAX_DECODE_BYTES).is_err());
    }

    #[test]
    fn test_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let err = convert_to_png(dir.path().join("nope.tif"), dir.path().join("out.png"))
            .unwrap_err();
        assert!(matches!(err, ConversionError::Open { .. }));
    }

    #[test]
    fn test_undecodable_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("garbage.tif");
        std::fs::write(&input, b"definitely not an image").unwrap();

        let err = convert_to_png(&input, dir.path().join("out.png")).unwrap_err();
        assert!(matches!(err, ConversionError::Decode { .. }));
    }
}
