//! Pixel-to-model affine transforms.

use ortho_common::NativeBounds;

use crate::error::{GeoTiffError, Result};
use crate::geokeys::RasterType;

/// Affine transform from pixel (column i, row j) to model (x, y):
///
/// ```text
/// x = a * i + b * j + c
/// y = d * i + e * j + f
/// ```
///
/// Same coefficient layout as a GDAL/rasterio geotransform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelTransform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl PixelTransform {
    /// Build from ModelTiepointTag (33922) and ModelPixelScaleTag (33550).
    ///
    /// Only the first tie point is used; the Y scale is positive in the file
    /// and applied downward (rows grow southward).
    pub fn from_tiepoint(tiepoint: &[f64], scale: &[f64]) -> Result<Self> {
        if tiepoint.len() < 6 {
            return Err(GeoTiffError::InvalidGeoreference(format!(
                "ModelTiepoint needs 6 values, got {}",
                tiepoint.len()
            )));
        }
        if scale.len() < 2 {
            return Err(GeoTiffError::InvalidGeoreference(format!(
                "ModelPixelScale needs at least 2 values, got {}",
                scale.len()
            )));
        }

        let (i, j, x, y) = (tiepoint[0], tiepoint[1], tiepoint[3], tiepoint[4]);
        let (sx, sy) = (scale[0], scale[1]);

        Self {
            a: sx,
            b: 0.0,
            c: x - i * sx,
            d: 0.0,
            e: -sy,
            f: y + j * sy,
        }
        .validated()
    }

    /// Build from ModelTransformationTag (34264), a row-major 4x4 matrix.
    pub fn from_model_transformation(matrix: &[f64]) -> Result<Self> {
        if matrix.len() < 16 {
            return Err(GeoTiffError::InvalidGeoreference(format!(
                "ModelTransformation needs 16 values, got {}",
                matrix.len()
            )));
        }

        Self {
            a: matrix[0],
            b: matrix[1],
            c: matrix[3],
            d: matrix[4],
            e: matrix[5],
            f: matrix[7],
        }
        .validated()
    }

    fn validated(self) -> Result<Self> {
        let coeffs = [self.a, self.b, self.c, self.d, self.e, self.f];
        if coeffs.iter().any(|v| !v.is_finite()) {
            return Err(GeoTiffError::InvalidGeoreference(
                "non-finite transform coefficient".to_string(),
            ));
        }
        if self.a * self.e - self.b * self.d == 0.0 {
            return Err(GeoTiffError::InvalidGeoreference(
                "degenerate (zero-area) pixel transform".to_string(),
            ));
        }
        Ok(self)
    }

    /// Shift the origin for PixelIsPoint rasters so that pixel (0, 0)
    /// refers to the upper-left corner of the first pixel.
    pub fn for_raster_type(self, raster_type: RasterType) -> Self {
        match raster_type {
            RasterType::PixelIsArea => self,
            RasterType::PixelIsPoint => Self {
                c: self.c - 0.5 * self.a - 0.5 * self.b,
                f: self.f - 0.5 * self.d - 0.5 * self.e,
                ..self
            },
        }
    }

    /// Apply the transform to a pixel position.
    pub fn apply(&self, i: f64, j: f64) -> (f64, f64) {
        (
            self.a * i + self.b * j + self.c,
            self.d * i + self.e * j + self.f,
        )
    }

    /// Bounds covered by a `width` x `height` raster: the envelope of its
    /// four transformed corners.
    pub fn bounds(&self, width: u32, height: u32) -> NativeBounds {
        let (w, h) = (width as f64, height as f64);
        let corners = [
            self.apply(0.0, 0.0),
            self.apply(w, 0.0),
            self.apply(0.0, h),
            self.apply(w, h),
        ];
        // Four corners always yield an envelope
        NativeBounds::envelope(corners).unwrap_or(NativeBounds::new(0.0, 0.0, 0.0, 0.0))
    }
}
