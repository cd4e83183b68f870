//! In-memory GeoTIFF fixtures.
//!
//! Builds small RGB8 GeoTIFFs with ModelPixelScale/ModelTiepoint
//! georeferencing and a GeoKey directory, so tests never depend on
//! external raster files.

use std::io::Cursor;
use std::path::Path;

use tiff::encoder::{colortype, TiffEncoder};
use tiff::tags::Tag;

// GeoKey IDs
const GT_MODEL_TYPE_GEO_KEY: u16 = 1024;
const GT_RASTER_TYPE_GEO_KEY: u16 = 1025;
const GEOGRAPHIC_TYPE_GEO_KEY: u16 = 2048;
const PROJECTED_CS_TYPE_GEO_KEY: u16 = 3072;

/// Pure white, the background color that gets masked.
pub const WHITE: [u8; 3] = [255, 255, 255];
/// Almost white; must stay opaque.
pub const NEAR_WHITE: [u8; 3] = [254, 255, 255];
/// A terrain-like green.
pub const TERRAIN: [u8; 3] = [64, 128, 32];

/// Describes a GeoTIFF to generate.
#[derive(Debug, Clone)]
pub struct GeoTiffFixture {
    pub width: u32,
    pub height: u32,
    /// EPSG code written to the GeoKey directory (None writes no CRS keys)
    pub epsg: Option<u16>,
    /// Write GeographicTypeGeoKey instead of ProjectedCSTypeGeoKey
    pub geographic: bool,
    /// Model coordinate of the upper-left corner of pixel (0, 0)
    pub origin: (f64, f64),
    /// Pixel size in model units (both positive)
    pub pixel_size: (f64, f64),
    /// Write tie point/pixel scale tags
    pub georeferenced: bool,
    /// Write a GeoKey directory at all
    pub geokeys: bool,
    pub pixel_is_point: bool,
    /// Row-major RGB8 samples
    pub pixels: Vec<u8>,
}

impl GeoTiffFixture {
    /// A projected raster with the default pixel pattern.
    pub fn projected(epsg: u16, origin: (f64, f64), pixel_size: (f64, f64)) -> Self {
        let (width, height) = (8, 6);
        Self {
            width,
            height,
            epsg: Some(epsg),
            geographic: false,
            origin,
            pixel_size,
            georeferenced: true,
            geokeys: true,
            pixel_is_point: false,
            pixels: default_pattern(width, height),
        }
    }

    /// A 10 x 10 m pixel raster in UTM zone 33N with its west edge on the
    /// zone's central meridian (15E).
    pub fn utm33n() -> Self {
        Self::projected(32633, (500000.0, 4650000.0), (10.0, 10.0))
    }

    /// A large Web Mercator raster where Mercator's latitude stretching
    /// makes the native midpoint differ from the geographic midpoint.
    pub fn web_mercator() -> Self {
        Self::projected(3857, (1000000.0, 8000000.0), (250000.0, 500000.0))
    }

    /// Same georeferencing with different pixel dimensions and pattern.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self.pixels = default_pattern(width, height);
        self
    }

    /// Replace every pixel using a `(column, row) -> rgb` function.
    pub fn with_pixels(mut self, f: impl Fn(u32, u32) -> [u8; 3]) -> Self {
        self.pixels = (0..self.height)
            .flat_map(|y| (0..self.width).map(move |x| (x, y)))
            .flat_map(|(x, y)| f(x, y))
            .collect();
        self
    }

    pub fn without_crs(mut self) -> Self {
        self.epsg = None;
        self
    }

    pub fn without_geokeys(mut self) -> Self {
        self.geokeys = false;
        self
    }

    pub fn without_georeference(mut self) -> Self {
        self.georeferenced = false;
        self
    }

    pub fn pixel_is_point(mut self) -> Self {
        self.pixel_is_point = true;
        self
    }

    /// Native bounds (left, bottom, right, top) this fixture describes.
    pub fn expected_bounds(&self) -> (f64, f64, f64, f64) {
        let (left, top) = self.origin;
        let right = left + self.width as f64 * self.pixel_size.0;
        let bottom = top - self.height as f64 * self.pixel_size.1;
        (left, bottom, right, top)
    }

    fn geokey_directory(&self) -> Vec<u16> {
        let mut entries: Vec<[u16; 4]> = Vec::new();

        if let Some(epsg) = self.epsg {
            let (model_type, code_key) = if self.geographic {
                (2, GEOGRAPHIC_TYPE_GEO_KEY)
            } else {
                (1, PROJECTED_CS_TYPE_GEO_KEY)
            };
            entries.push([GT_MODEL_TYPE_GEO_KEY, 0, 1, model_type]);
            entries.push([GT_RASTER_TYPE_GEO_KEY, 0, 1, self.raster_type()]);
            entries.push([code_key, 0, 1, epsg]);
        } else {
            entries.push([GT_RASTER_TYPE_GEO_KEY, 0, 1, self.raster_type()]);
        }

        let mut keys = vec![1, 1, 0, entries.len() as u16];
        for entry in entries {
            keys.extend_from_slice(&entry);
        }
        keys
    }

    fn raster_type(&self) -> u16 {
        if self.pixel_is_point {
            2
        } else {
            1
        }
    }

    /// Encode as an uncompressed GeoTIFF.
    pub fn to_bytes(&self) -> Vec<u8> {
        assert_eq!(
            self.pixels.len(),
            (self.width * self.height * 3) as usize,
            "pixel buffer does not match dimensions"
        );

        let mut cursor = Cursor::new(Vec::new());
        {
            let mut encoder = TiffEncoder::new(&mut cursor).expect("create TIFF encoder");
            let mut image = encoder
                .new_image::<colortype::RGB8>(self.width, self.height)
                .expect("create TIFF image");

            let dir = image.encoder();
            if self.georeferenced {
                let (sx, sy) = self.pixel_size;
                let (mut x, mut y) = self.origin;
                if self.pixel_is_point {
                    // Tie point refers to the first pixel's center
                    x += sx / 2.0;
                    y -= sy / 2.0;
                }
                let scale = [sx, sy, 0.0];
                let tiepoint = [0.0, 0.0, 0.0, x, y, 0.0];
                dir.write_tag(Tag::ModelPixelScaleTag, &scale[..])
                    .expect("write ModelPixelScale");
                dir.write_tag(Tag::ModelTiepointTag, &tiepoint[..])
                    .expect("write ModelTiepoint");
            }
            if self.geokeys {
                let keys = self.geokey_directory();
                dir.write_tag(Tag::GeoKeyDirectoryTag, &keys[..])
                    .expect("write GeoKeyDirectory");
            }

            image.write_data(&self.pixels).expect("write TIFF pixels");
        }
        cursor.into_inner()
    }

    /// Write the encoded GeoTIFF to `path`, creating parent directories.
    pub fn write_to(&self, path: &Path) {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create fixture directory");
        }
        std::fs::write(path, self.to_bytes()).expect("write GeoTIFF fixture");
    }
}

/// Upper-left quadrant pure white, one near-white pixel at (width-1, 0),
/// everything else terrain green.
fn default_pattern(width: u32, height: u32) -> Vec<u8> {
    let mut pixels = Vec::with_capacity((width * height * 3) as usize);
    for y in 0..height {
        for x in 0..width {
            let rgb = if x < width / 2 && y < height / 2 {
                WHITE
            } else if x == width - 1 && y == 0 {
                NEAR_WHITE
            } else {
                TERRAIN
            };
            pixels.extend_from_slice(&rgb);
        }
    }
    pixels
}

/// Number of pure-white pixels in the default pattern.
pub fn default_pattern_white_count(width: u32, height: u32) -> usize {
    ((width / 2) * (height / 2)) as usize
}
