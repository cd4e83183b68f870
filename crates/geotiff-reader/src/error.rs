//! Error types for GeoTIFF reading.

use thiserror::Error;

/// Errors that can occur while reading GeoTIFF georeferencing.
#[derive(Error, Debug)]
pub enum GeoTiffError {
    #[error("Failed to open raster: {0}")]
    Open(#[from] std::io::Error),

    #[error("Failed to decode TIFF: {0}")]
    Decode(#[from] tiff::TiffError),

    #[error("Raster has no georeferencing (no tie point/pixel scale or model transformation)")]
    MissingGeoreference,

    #[error("Invalid georeferencing: {0}")]
    InvalidGeoreference(String),

    #[error("Raster has no CRS")]
    MissingCrs,

    #[error("Malformed CRS: {0}")]
    MalformedCrs(String),
}

/// Result type for GeoTIFF operations.
pub type Result<T> = std::result::Result<T, GeoTiffError>;

impl From<GeoTiffError> for ortho_common::OrthoError {
    fn from(err: GeoTiffError) -> Self {
        ortho_common::OrthoError::BoundsRead(err.to_string())
    }
}
