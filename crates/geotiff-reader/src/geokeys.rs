//! GeoKey directory parsing.
//!
//! The GeoKeyDirectoryTag (34735) is an array of u16:
//! `[KeyDirectoryVersion, KeyRevision, MinorRevision, NumberOfKeys,
//!   KeyID, TIFFTagLocation, Count, Value_Offset, ...]`
//!
//! Keys with `TIFFTagLocation == 0` store their value inline in
//! `Value_Offset`. Only inline SHORT keys are needed to identify an EPSG CRS.

use std::collections::HashMap;

use ortho_common::CrsCode;

use crate::error::{GeoTiffError, Result};

// GeoKey IDs
pub const GT_MODEL_TYPE_GEO_KEY: u16 = 1024;
pub const GT_RASTER_TYPE_GEO_KEY: u16 = 1025;
pub const GEOGRAPHIC_TYPE_GEO_KEY: u16 = 2048;
pub const PROJECTED_CS_TYPE_GEO_KEY: u16 = 3072;

// GeoKey values
pub const MODEL_TYPE_PROJECTED: u16 = 1;
pub const MODEL_TYPE_GEOGRAPHIC: u16 = 2;
pub const RASTER_PIXEL_IS_AREA: u16 = 1;
pub const RASTER_PIXEL_IS_POINT: u16 = 2;

const HEADER_LEN: usize = 4;
const ENTRY_LEN: usize = 4;

/// How pixel coordinates relate to the model space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RasterType {
    /// Tie points reference the pixel's upper-left corner
    #[default]
    PixelIsArea,
    /// Tie points reference the pixel's center
    PixelIsPoint,
}

#[derive(Debug, Clone, Copy)]
struct KeyEntry {
    location: u16,
    count: u16,
    value: u16,
}

/// Parsed GeoKey directory.
#[derive(Debug, Clone)]
pub struct GeoKeyDirectory {
    keys: HashMap<u16, KeyEntry>,
}

impl GeoKeyDirectory {
    /// Parse the raw GeoKeyDirectoryTag array.
    pub fn parse(raw: &[u16]) -> Result<Self> {
        if raw.len() < HEADER_LEN {
            return Err(GeoTiffError::MalformedCrs(format!(
                "GeoKey directory too short ({} values)",
                raw.len()
            )));
        }

        let key_count = raw[3] as usize;
        let needed = HEADER_LEN + key_count * ENTRY_LEN;
        if raw.len() < needed {
            return Err(GeoTiffError::MalformedCrs(format!(
                "GeoKey directory declares {} keys but holds {} values",
                key_count,
                raw.len()
            )));
        }

        let keys = raw[HEADER_LEN..needed]
            .chunks_exact(ENTRY_LEN)
            .map(|e| {
                (
                    e[0],
                    KeyEntry {
                        location: e[1],
                        count: e[2],
                        value: e[3],
                    },
                )
            })
            .collect();

        Ok(Self { keys })
    }

    /// Inline SHORT value of a key, if present.
    ///
    /// Keys stored in another tag (double or ASCII params) are reported as
    /// malformed since none of the keys read here should live there.
    pub fn short_value(&self, key: u16) -> Result<Option<u16>> {
        match self.keys.get(&key) {
            None => Ok(None),
            Some(entry) if entry.location == 0 && entry.count <= 1 => Ok(Some(entry.value)),
            Some(entry) => Err(GeoTiffError::MalformedCrs(format!(
                "GeoKey {} stored out of line (tag {}, count {})",
                key, entry.location, entry.count
            ))),
        }
    }

    /// Raster type, defaulting to PixelIsArea when the key is absent.
    pub fn raster_type(&self) -> Result<RasterType> {
        Ok(match self.short_value(GT_RASTER_TYPE_GEO_KEY)? {
            Some(RASTER_PIXEL_IS_POINT) => RasterType::PixelIsPoint,
            _ => RasterType::PixelIsArea,
        })
    }

    /// EPSG code of the raster's CRS.
    ///
    /// Uses the model type to pick between the projected and geographic
    /// code keys; without a model type the projected key wins.
    pub fn crs(&self) -> Result<CrsCode> {
        let model_type = self.short_value(GT_MODEL_TYPE_GEO_KEY)?;

        let code = match model_type {
            Some(MODEL_TYPE_PROJECTED) => self.short_value(PROJECTED_CS_TYPE_GEO_KEY)?,
            Some(MODEL_TYPE_GEOGRAPHIC) => self.short_value(GEOGRAPHIC_TYPE_GEO_KEY)?,
            Some(other) => {
                return Err(GeoTiffError::MalformedCrs(format!(
                    "unsupported model type {}",
                    other
                )))
            }
            None => match self.short_value(PROJECTED_CS_TYPE_GEO_KEY)? {
                Some(code) => Some(code),
                None => self.short_value(GEOGRAPHIC_TYPE_GEO_KEY)?,
            },
        };

        match code {
            None => Err(GeoTiffError::MissingCrs),
            Some(0) => Err(GeoTiffError::MalformedCrs("undefined CRS code 0".to_string())),
            Some(CrsCode::USER_DEFINED) => Err(GeoTiffError::MalformedCrs(
                "user-defined CRS has no EPSG code".to_string(),
            )),
            Some(code) => Ok(CrsCode::from_epsg(code)),
        }
    }
}
