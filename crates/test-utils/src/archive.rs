//! ZIP archive builders.

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::geotiff::GeoTiffFixture;

/// Relative path of the orthophoto inside a photogrammetry archive.
pub const ORTHOPHOTO_ENTRY: &str = "odm_orthophoto/odm_orthophoto.tif";

/// Build a ZIP archive from `(entry name, contents)` pairs.
pub fn zip_archive(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();

    for (name, data) in entries {
        writer.start_file(*name, options).expect("start zip entry");
        writer.write_all(data).expect("write zip entry");
    }

    writer.finish().expect("finish zip archive").into_inner()
}

/// An archive shaped like photogrammetry output: the orthophoto plus a
/// couple of unrelated report files.
pub fn orthophoto_archive(fixture: &GeoTiffFixture) -> Vec<u8> {
    let tiff = fixture.to_bytes();
    zip_archive(&[
        (ORTHOPHOTO_ENTRY, &tiff),
        ("odm_report/report.txt", b"processing finished"),
        ("log.json", b"{\"status\": \"done\"}"),
    ])
}
