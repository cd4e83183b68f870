//! Orthophoto project ingestion.
//!
//! Turns an uploaded photogrammetry archive into web-ready outputs:
//!
//! - Extracts `all.zip` into the project directory
//! - Converts `odm_orthophoto/odm_orthophoto.tif` to a PNG with a
//!   transparent background
//! - Reprojects the raster's bounds and center to WGS84 and persists them
//!   as `bounds.json`
//!
//! Everything here is synchronous file and CPU work.

pub mod archive;
pub mod bounds;
pub mod error;
pub mod pipeline;

// Re-exports
pub use archive::extract_archive;
pub use bounds::{compute_geo_bounds, geo_bounds_from_native};
pub use error::{BoundsReadError, IngestionError, Result};
pub use pipeline::{PipelineStage, ProcessingResult, ProjectProcessor};
