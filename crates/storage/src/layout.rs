//! File layout of a single project directory.

use std::path::{Path, PathBuf};

/// Archive uploaded for a project.
pub const ARCHIVE_FILE: &str = "all.zip";
/// Directory inside the archive holding the orthophoto outputs.
pub const ORTHOPHOTO_DIR: &str = "odm_orthophoto";
/// GeoTIFF produced by the photogrammetry toolchain.
pub const ORTHOPHOTO_TIF: &str = "odm_orthophoto.tif";
/// Web-ready PNG written next to the GeoTIFF.
pub const ORTHOPHOTO_PNG: &str = "odm_orthophoto.png";
/// Persisted geographic bounds.
pub const BOUNDS_FILE: &str = "bounds.json";

/// Paths of every file the service reads or writes for one project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    dir: PathBuf,
}

impl ProjectLayout {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn archive(&self) -> PathBuf {
        self.dir.join(ARCHIVE_FILE)
    }

    pub fn orthophoto_dir(&self) -> PathBuf {
        self.dir.join(ORTHOPHOTO_DIR)
    }

    pub fn orthophoto_tif(&self) -> PathBuf {
        self.orthophoto_dir().join(ORTHOPHOTO_TIF)
    }

    pub fn orthophoto_png(&self) -> PathBuf {
        self.orthophoto_dir().join(ORTHOPHOTO_PNG)
    }

    pub fn bounds_json(&self) -> PathBuf {
        self.dir.join(BOUNDS_FILE)
    }
}
