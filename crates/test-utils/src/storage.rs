//! Temporary storage roots laid out like the service expects:
//! `{root}/projects/{project_id}/all.zip`.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::archive::orthophoto_archive;
use crate::geotiff::GeoTiffFixture;

/// A storage root that is deleted when dropped.
pub struct TempStorage {
    dir: TempDir,
}

impl TempStorage {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp storage root"),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Create (if needed) and return a project directory.
    pub fn project_dir(&self, project_id: &str) -> PathBuf {
        let dir = self.root().join("projects").join(project_id);
        std::fs::create_dir_all(&dir).expect("create project directory");
        dir
    }

    /// Place raw bytes as the project's `all.zip`.
    pub fn add_archive(&self, project_id: &str, archive: &[u8]) -> PathBuf {
        let path = self.project_dir(project_id).join("all.zip");
        std::fs::write(&path, archive).expect("write all.zip");
        path
    }

    /// Place an orthophoto archive built from `fixture` as `all.zip`.
    pub fn add_orthophoto_project(&self, project_id: &str, fixture: &GeoTiffFixture) -> PathBuf {
        self.add_archive(project_id, &orthophoto_archive(fixture))
    }
}

impl Default for TempStorage {
    fn default() -> Self {
        Self::new()
    }
}
