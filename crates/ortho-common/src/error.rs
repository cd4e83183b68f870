//! Error types for the orthophoto services.

use thiserror::Error;

/// Result type alias using OrthoError.
pub type OrthoResult<T> = Result<T, OrthoError>;

/// Primary error type surfaced at the HTTP boundary.
///
/// Crate-local errors (GeoTIFF decoding, reprojection, image conversion,
/// ingestion) convert into this taxonomy so handlers map every failure to a
/// status code in one place.
#[derive(Debug, Error)]
pub enum OrthoError {
    // === Request Errors ===
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    PathTraversal(String),

    #[error("{0}")]
    NotADirectory(String),

    #[error("Invalid parameter value for '{param}': {message}")]
    InvalidParameter { param: String, message: String },

    // === Data Errors ===
    #[error("{0}")]
    Parse(String),

    #[error("Error reading GeoTIFF bounds: {0}")]
    BoundsRead(String),

    #[error("Error converting GeoTIFF to PNG: {0}")]
    ImageConversion(String),

    #[error("Archive extraction failed: {0}")]
    Archive(String),

    // === Infrastructure Errors ===
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl OrthoError {
    /// Short machine-readable name of the error kind, used as a log field
    /// and metrics label.
    pub fn kind(&self) -> &'static str {
        match self {
            OrthoError::NotFound(_) => "not_found",
            OrthoError::PathTraversal(_) => "path_traversal",
            OrthoError::NotADirectory(_) => "not_a_directory",
            OrthoError::InvalidParameter { .. } => "invalid_parameter",
            OrthoError::Parse(_) => "parse",
            OrthoError::BoundsRead(_) => "bounds_read",
            OrthoError::ImageConversion(_) => "image_conversion",
            OrthoError::Archive(_) => "archive",
            OrthoError::Storage(_) => "storage",
            OrthoError::Internal(_) => "internal",
            OrthoError::ServiceUnavailable(_) => "service_unavailable",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn http_status_code(&self) -> u16 {
        match self {
            OrthoError::PathTraversal(_)
            | OrthoError::NotADirectory(_)
            | OrthoError::InvalidParameter { .. } => 400,

            OrthoError::NotFound(_) => 404,

            OrthoError::ServiceUnavailable(_) => 503,

            _ => 500,
        }
    }
}

// Conversion from common error types
impl From<std::io::Error> for OrthoError {
    fn from(err: std::io::Error) -> Self {
        OrthoError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for OrthoError {
    fn from(err: serde_json::Error) -> Self {
        OrthoError::Parse(format!("JSON error: {}", err))
    }
}
