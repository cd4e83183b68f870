//! Error types for the ingestion crate.

use geotiff_reader::GeoTiffError;
use ortho_common::OrthoError;
use projection::ProjectionError;
use renderer::ConversionError;
use thiserror::Error;

/// Failure to derive geographic bounds from a raster.
#[derive(Error, Debug)]
pub enum BoundsReadError {
    #[error(transparent)]
    GeoTiff(#[from] GeoTiffError),

    #[error(transparent)]
    Projection(#[from] ProjectionError),
}

/// Errors that can occur while processing a project.
#[derive(Error, Debug)]
pub enum IngestionError {
    #[error("{0}")]
    NotFound(String),

    #[error("Archive extraction failed: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("Archive entry '{0}' would be written outside the project folder")]
    UnsafeEntry(String),

    #[error("Error reading GeoTIFF bounds: {0}")]
    BoundsRead(#[from] BoundsReadError),

    #[error("Error converting GeoTIFF to PNG: {0}")]
    ImageConversion(#[from] ConversionError),

    #[error(transparent)]
    Storage(#[from] OrthoError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestionError>;

impl From<IngestionError> for OrthoError {
    fn from(err: IngestionError) -> Self {
        match err {
            IngestionError::NotFound(msg) => OrthoError::NotFound(msg),
            IngestionError::Archive(e) => OrthoError::Archive(e.to_string()),
            IngestionError::UnsafeEntry(name) => OrthoError::Archive(format!(
                "entry '{}' would be written outside the project folder",
                name
            )),
            IngestionError::BoundsRead(e) => OrthoError::BoundsRead(e.to_string()),
            IngestionError::ImageConversion(e) => OrthoError::ImageConversion(e.to_string()),
            IngestionError::Storage(e) => e,
            IngestionError::Io(e) => OrthoError::Storage(e.to_string()),
        }
    }
}
