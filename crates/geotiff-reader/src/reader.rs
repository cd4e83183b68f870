//! Raster source metadata from a GeoTIFF file.

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use ortho_common::{CrsCode, NativeBounds};
use tiff::decoder::Decoder;
use tiff::tags::Tag;
use tracing::debug;

use crate::error::{GeoTiffError, Result};
use crate::geokeys::GeoKeyDirectory;
use crate::georef::PixelTransform;

/// Georeferencing of a GeoTIFF raster.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterSource {
    pub width: u32,
    pub height: u32,
    pub crs: CrsCode,
    pub transform: PixelTransform,
    pub bounds: NativeBounds,
}

impl RasterSource {
    /// Open a GeoTIFF file and read its bounds and CRS.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let source = Self::from_reader(BufReader::new(file))?;

        debug!(
            path = %path.display(),
            crs = %source.crs,
            width = source.width,
            height = source.height,
            left = source.bounds.left,
            bottom = source.bounds.bottom,
            right = source.bounds.right,
            top = source.bounds.top,
            "Read GeoTIFF georeferencing"
        );

        Ok(source)
    }

    /// Read georeferencing from any seekable TIFF stream.
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        let mut decoder = Decoder::new(reader)?;
        let (width, height) = decoder.dimensions()?;

        let transform = read_pixel_transform(&mut decoder)?;

        let geokeys = match decoder.find_tag(Tag::GeoKeyDirectoryTag)? {
            Some(value) => GeoKeyDirectory::parse(&value.into_u16_vec()?)?,
            None => return Err(GeoTiffError::MissingCrs),
        };
        let crs = geokeys.crs()?;
        let transform = transform.for_raster_type(geokeys.raster_type()?);

        Ok(Self {
            width,
            height,
            crs,
            transform,
            bounds: transform.bounds(width, height),
        })
    }
}

fn read_pixel_transform<R: Read + Seek>(decoder: &mut Decoder<R>) -> Result<PixelTransform> {
    if let Some(matrix) = decoder.find_tag(Tag::ModelTransformationTag)? {
        return PixelTransform::from_model_transformation(&matrix.into_f64_vec()?);
    }

    let tiepoint = decoder.find_tag(Tag::ModelTiepointTag)?;
    let scale = decoder.find_tag(Tag::ModelPixelScaleTag)?;

    match (tiepoint, scale) {
        (Some(tiepoint), Some(scale)) => {
            PixelTransform::from_tiepoint(&tiepoint.into_f64_vec()?, &scale.into_f64_vec()?)
        }
        _ => Err(GeoTiffError::MissingGeoreference),
    }
}
