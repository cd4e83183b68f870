//! Reading georeferencing from encoded GeoTIFF files.

use std::io::Cursor;

use geotiff_reader::{GeoTiffError, RasterSource};
use ortho_common::CrsCode;
use test_utils::{assert_approx_eq, GeoTiffFixture};

fn read(fixture: &GeoTiffFixture) -> Result<RasterSource, GeoTiffError> {
    RasterSource::from_reader(Cursor::new(fixture.to_bytes()))
}

#[test]
fn test_utm_bounds_and_crs() {
    let fixture = GeoTiffFixture::utm33n();
    let source = read(&fixture).unwrap();

    assert_eq!(source.crs, CrsCode::from_epsg(32633));
    assert_eq!((source.width, source.height), (8, 6));

    let (left, bottom, right, top) = fixture.expected_bounds();
    assert_approx_eq!(source.bounds.left, left, 1e-9);
    assert_approx_eq!(source.bounds.bottom, bottom, 1e-9);
    assert_approx_eq!(source.bounds.right, right, 1e-9);
    assert_approx_eq!(source.bounds.top, top, 1e-9);
}

#[test]
fn test_open_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("odm_orthophoto.tif");
    let fixture = GeoTiffFixture::web_mercator();
    fixture.write_to(&path);

    let source = RasterSource::open(&path).unwrap();
    assert_eq!(source.crs, CrsCode::WEB_MERCATOR);
    assert_approx_eq!(source.bounds.left, 1000000.0, 1e-6);
    assert_approx_eq!(source.bounds.top, 8000000.0, 1e-6);
    assert_approx_eq!(source.bounds.right, 3000000.0, 1e-6);
    assert_approx_eq!(source.bounds.bottom, 5000000.0, 1e-6);
}

#[test]
fn test_pixel_is_point_gives_same_extent() {
    // The fixture moves the tie point to the first pixel center for
    // PixelIsPoint; the reader has to move it back.
    let area = read(&GeoTiffFixture::utm33n()).unwrap();
    let point = read(&GeoTiffFixture::utm33n().pixel_is_point()).unwrap();

    assert_approx_eq!(point.bounds.left, area.bounds.left, 1e-9);
    assert_approx_eq!(point.bounds.bottom, area.bounds.bottom, 1e-9);
    assert_approx_eq!(point.bounds.right, area.bounds.right, 1e-9);
    assert_approx_eq!(point.bounds.top, area.bounds.top, 1e-9);
}

#[test]
fn test_geographic_raster() {
    let mut fixture = GeoTiffFixture::projected(4326, (10.0, 50.0), (0.001, 0.001));
    fixture.geographic = true;

    let source = read(&fixture).unwrap();
    assert_eq!(source.crs, CrsCode::WGS84);
    assert_approx_eq!(source.bounds.right, 10.008, 1e-12);
    assert_approx_eq!(source.bounds.bottom, 49.994, 1e-12);
}

#[test]
fn test_missing_crs_code() {
    let err = read(&GeoTiffFixture::utm33n().without_crs()).unwrap_err();
    assert!(matches!(err, GeoTiffError::MissingCrs), "got {err:?}");
}

#[test]
fn test_missing_geokey_directory() {
    let err = read(&GeoTiffFixture::utm33n().without_geokeys()).unwrap_err();
    assert!(matches!(err, GeoTiffError::MissingCrs), "got {err:?}");
}

#[test]
fn test_plain_tiff_has_no_georeference() {
    let err = read(&GeoTiffFixture::utm33n().without_georeference()).unwrap_err();
    assert!(matches!(err, GeoTiffError::MissingGeoreference), "got {err:?}");
}

#[test]
fn test_user_defined_crs_rejected() {
    let fixture = GeoTiffFixture::projected(CrsCode::USER_DEFINED, (0.0, 0.0), (1.0, 1.0));
    let err = read(&fixture).unwrap_err();
    assert!(matches!(err, GeoTiffError::MalformedCrs(_)), "got {err:?}");
}

#[test]
fn test_not_a_tiff() {
    let err = RasterSource::from_reader(Cursor::new(b"PK\x03\x04 zip, not tiff".to_vec())).unwrap_err();
    assert!(matches!(err, GeoTiffError::Decode(_)), "got {err:?}");
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = RasterSource::open(dir.path().join("absent.tif")).unwrap_err();
    assert!(matches!(err, GeoTiffError::Open(_)), "got {err:?}");
}
