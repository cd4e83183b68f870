//! Coordinate reference system transformations.
//!
//! Reprojects coordinates between EPSG-coded CRSs using `proj4rs` and the
//! bundled `crs-definitions` database, so no system PROJ install is needed.

pub mod transform;

pub use transform::{get_proj_string, ProjectionError, Reprojector};
