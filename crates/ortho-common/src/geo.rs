//! Geographic (WGS84 latitude/longitude) result types.

use serde::{Deserialize, Serialize};

/// A geographic point in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Build from a transform output, which is ordered (lon, lat).
    pub fn from_lon_lat((lon, lat): (f64, f64)) -> Self {
        Self { lat, lon }
    }
}

/// Geographic bounds and center of an orthophoto.
///
/// Field order matches the persisted `bounds.json` document.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub top_left: GeoPoint,
    pub bottom_right: GeoPoint,
    pub center: GeoPoint,
}
