//! EPSG-to-EPSG point reprojection.
//!
//! Coordinates are always handled in (x, y) order: easting/longitude first,
//! northing/latitude second, whatever axis order the target CRS officially
//! declares. Geographic coordinates are in degrees on both sides of the API.

use std::fmt;

use ortho_common::CrsCode;
use proj4rs::proj::Proj;

/// Errors raised while building or applying a reprojection.
#[derive(Debug, thiserror::Error)]
pub enum ProjectionError {
    #[error("{0} is not in the crs-definitions database")]
    UnknownCrs(CrsCode),

    #[error("Invalid projection definition for {crs}: {message}")]
    InvalidDefinition { crs: CrsCode, message: String },

    #[error("Transform from {from} to {to} failed: {message}")]
    TransformFailed {
        from: CrsCode,
        to: CrsCode,
        message: String,
    },
}

impl From<ProjectionError> for ortho_common::OrthoError {
    fn from(err: ProjectionError) -> Self {
        ortho_common::OrthoError::BoundsRead(err.to_string())
    }
}

/// Get the PROJ.4 string for an EPSG code from the crs-definitions database.
pub fn get_proj_string(crs: CrsCode) -> Option<&'static str> {
    crs_definitions::from_code(crs.epsg()).map(|def| def.proj4)
}

struct Endpoint {
    crs: CrsCode,
    proj: Proj,
    geographic: bool,
}

impl Endpoint {
    fn new(crs: CrsCode) -> Result<Self, ProjectionError> {
        let definition = get_proj_string(crs).ok_or(ProjectionError::UnknownCrs(crs))?;
        let proj = Proj::from_proj_string(definition).map_err(|e| {
            ProjectionError::InvalidDefinition {
                crs,
                message: format!("{e:?}"),
            }
        })?;

        Ok(Self {
            crs,
            proj,
            geographic: definition.contains("+proj=longlat"),
        })
    }
}

/// A reusable transformation from one CRS to another.
pub struct Reprojector {
    source: Endpoint,
    target: Endpoint,
}

impl Reprojector {
    /// Build a reprojection between two EPSG codes.
    ///
    /// # Errors
    /// Fails if either code is unknown or its definition cannot be parsed.
    pub fn new(source: CrsCode, target: CrsCode) -> Result<Self, ProjectionError> {
        Ok(Self {
            source: Endpoint::new(source)?,
            target: Endpoint::new(target)?,
        })
    }

    /// Build a reprojection from `source` to WGS84 (EPSG:4326).
    pub fn to_wgs84(source: CrsCode) -> Result<Self, ProjectionError> {
        Self::new(source, CrsCode::WGS84)
    }

    /// Transform one (x, y) pair.
    ///
    /// When the target is geographic the result is (lon, lat) in degrees.
    pub fn transform(&self, x: f64, y: f64) -> Result<(f64, f64), ProjectionError> {
        if self.source.crs == self.target.crs {
            return Ok((x, y));
        }

        // proj4rs works in radians for geographic coordinates
        let mut point = if self.source.geographic {
            (x.to_radians(), y.to_radians(), 0.0)
        } else {
            (x, y, 0.0)
        };

        proj4rs::transform::transform(&self.source.proj, &self.target.proj, &mut point)
            .map_err(|e| self.failure(format!("{e:?}")))?;

        let (out_x, out_y) = if self.target.geographic {
            (point.0.to_degrees(), point.1.to_degrees())
        } else {
            (point.0, point.1)
        };

        if !out_x.is_finite() || !out_y.is_finite() {
            return Err(self.failure(format!("non-finite result for ({x}, {y})")));
        }

        Ok((out_x, out_y))
    }

    fn failure(&self, message: String) -> ProjectionError {
        ProjectionError::TransformFailed {
            from: self.source.crs,
            to: self.target.crs,
            message,
        }
    }
}

impl fmt::Debug for Reprojector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reprojector")
            .field("source", &self.source.crs)
            .field("target", &self.target.crs)
            .finish()
    }
}
