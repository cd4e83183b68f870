//! Coordinate Reference System identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An EPSG coordinate reference system code.
///
/// GeoTIFF stores CRS codes as 16-bit GeoKey values, so `u16` covers every
/// code a raster can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CrsCode(u16);

impl CrsCode {
    /// WGS84 Geographic (lon/lat in degrees)
    pub const WGS84: CrsCode = CrsCode(4326);
    /// Web Mercator (meters)
    pub const WEB_MERCATOR: CrsCode = CrsCode(3857);

    /// GeoKey value meaning "user-defined", which carries no EPSG code.
    pub const USER_DEFINED: u16 = 32767;

    pub fn from_epsg(code: u16) -> Self {
        Self(code)
    }

    /// Numeric EPSG code.
    pub fn epsg(&self) -> u16 {
        self.0
    }

    /// Parse a CRS string such as "EPSG:32633" (case-insensitive).
    pub fn from_epsg_string(s: &str) -> Result<Self, CrsParseError> {
        let normalized = s.trim().to_uppercase();
        let code = normalized
            .strip_prefix("EPSG:")
            .ok_or_else(|| CrsParseError::UnsupportedCrs(s.to_string()))?;

        code.parse::<u16>()
            .ok()
            .filter(|c| *c != 0 && *c != Self::USER_DEFINED)
            .map(Self)
            .ok_or_else(|| CrsParseError::InvalidCode(s.to_string()))
    }
}

impl fmt::Display for CrsCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EPSG:{}", self.0)
    }
}

impl FromStr for CrsCode {
    type Err = CrsParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_epsg_string(s)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CrsParseError {
    #[error("Unsupported CRS: {0}")]
    UnsupportedCrs(String),

    #[error("Invalid EPSG code: {0}")]
    InvalidCode(String),
}
