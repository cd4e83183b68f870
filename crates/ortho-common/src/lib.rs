//! Common types and utilities shared across the orthophoto services.

pub mod bbox;
pub mod crs;
pub mod error;
pub mod geo;

pub use bbox::NativeBounds;
pub use crs::{CrsCode, CrsParseError};
pub use error::{OrthoError, OrthoResult};
pub use geo::{GeoBounds, GeoPoint};
