//! GeoTIFF georeferencing reader.
//!
//! Reads just enough of a GeoTIFF header to locate the raster on Earth:
//! - Pixel-to-model transform (tie point + pixel scale, or a full
//!   model transformation matrix)
//! - Coordinate reference system from the GeoKey directory
//!
//! Pixel data is never decoded here.

pub mod error;
pub mod geokeys;
pub mod georef;
pub mod reader;

pub use error::{GeoTiffError, Result};
pub use geokeys::{GeoKeyDirectory, RasterType};
pub use georef::PixelTransform;
pub use reader::RasterSource;
