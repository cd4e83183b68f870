//! Geographic bounds of an orthophoto.

use std::path::Path;

use geotiff_reader::RasterSource;
use ortho_common::{GeoBounds, GeoPoint, NativeBounds};
use projection::{ProjectionError, Reprojector};
use tracing::debug;

use crate::error::BoundsReadError;

/// Read a GeoTIFF's native bounds and express them in WGS84.
pub fn compute_geo_bounds(path: &Path) -> Result<GeoBounds, BoundsReadError> {
    let source = RasterSource::open(path)?;
    let reprojector = Reprojector::to_wgs84(source.crs)?;
    let bounds = geo_bounds_from_native(&source.bounds, &reprojector)?;

    debug!(
        path = %path.display(),
        crs = %source.crs,
        center_lat = bounds.center.lat,
        center_lon = bounds.center.lon,
        "Computed geographic bounds"
    );
    Ok(bounds)
}

/// Reproject the top-left and bottom-right corners plus the midpoint.
///
/// The center is the native-CRS midpoint reprojected, which is not the
/// same as averaging the geographic corners once the projection distorts
/// distances (Mercator latitudes, for example).
pub fn geo_bounds_from_native(
    bounds: &NativeBounds,
    reprojector: &Reprojector,
) -> Result<GeoBounds, ProjectionError> {
    let project = |(x, y): (f64, f64)| reprojector.transform(x, y).map(GeoPoint::from_lon_lat);

    Ok(GeoBounds {
        top_left: project(bounds.top_left())?,
        bottom_right: project(bounds.bottom_right())?,
        center: project(bounds.midpoint())?,
    })
}
