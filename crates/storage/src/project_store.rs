//! Access to project directories under the storage root.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use ortho_common::{GeoBounds, OrthoError, OrthoResult};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::value::RawValue;
use tracing::{debug, instrument, warn};

use crate::layout::ProjectLayout;
use crate::listing::{normalize_path, StorageListing};

const PROJECTS_DIR: &str = "projects";

/// Handle on the storage root.
///
/// Cheap to clone; holds only the root path.
#[derive(Debug, Clone)]
pub struct ProjectStore {
    root: PathBuf,
}

impl ProjectStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Storage root as configured.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// True when the storage root exists and is a directory.
    pub fn is_available(&self) -> bool {
        fs::metadata(&self.root).map(|m| m.is_dir()).unwrap_or(false)
    }

    /// Layout of `{root}/projects/{project_id}`.
    ///
    /// Project ids are a single path segment; anything that would resolve
    /// outside the projects directory is rejected.
    pub fn project(&self, project_id: &str) -> OrthoResult<ProjectLayout> {
        let invalid = project_id.is_empty()
            || project_id == "."
            || project_id == ".."
            || project_id.contains(['/', '\\', '\0']);
        if invalid {
            return Err(OrthoError::InvalidParameter {
                param: "project_id".to_string(),
                message: format!("'{}' is not a valid project id", project_id),
            });
        }
        Ok(ProjectLayout::new(
            self.root.join(PROJECTS_DIR).join(project_id),
        ))
    }

    /// Write `bounds.json` for a project, pretty-printed with four-space
    /// indentation. Returns the path written.
    pub fn write_bounds(&self, project_id: &str, bounds: &GeoBounds) -> OrthoResult<PathBuf> {
        let path = self.project(project_id)?.bounds_json();

        let mut buf = Vec::new();
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
        bounds.serialize(&mut ser)?;

        fs::write(&path, buf).map_err(|e| {
            OrthoError::Storage(format!("Failed to write {}: {}", path.display(), e))
        })?;

        debug!(project_id, path = %path.display(), "Wrote bounds document");
        Ok(path)
    }

    /// Read a project's `bounds.json` exactly as stored.
    ///
    /// The document is validated as JSON but kept as raw text, so key order
    /// and number formatting reach the caller unchanged.
    pub fn read_bounds(&self, project_id: &str) -> OrthoResult<Box<RawValue>> {
        let path = self.project(project_id)?.bounds_json();

        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(OrthoError::NotFound(
                    "bounds.json not found in the project folder".to_string(),
                ));
            }
            Err(e) => {
                return Err(OrthoError::Parse(format!("Error reading bounds.json: {}", e)));
            }
        };

        serde_json::from_slice(&bytes)
            .map_err(|e| OrthoError::Parse(format!("Error reading bounds.json: {}", e)))
    }

    /// List the immediate entries of `{root}/{subpath}`.
    ///
    /// The joined path is normalized lexically and must stay inside the
    /// root, compared component by component so `/data2` is not treated as
    /// being inside `/data`. An empty subpath lists the root itself.
    #[instrument(skip(self), fields(root = %self.root.display()))]
    pub fn check_storage(&self, subpath: &str) -> OrthoResult<StorageListing> {
        let root = self.absolute_root()?;
        let full_path = normalize_path(&root.join(subpath));

        if !full_path.starts_with(&root) {
            warn!(subpath, resolved = %full_path.display(), "Rejected storage path outside root");
            return Err(OrthoError::PathTraversal(
                "Subpath is outside the allowed storage directory.".to_string(),
            ));
        }

        let full_path_str = full_path.display().to_string();
        let metadata = match fs::metadata(&full_path) {
            Ok(m) => m,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(OrthoError::NotFound(format!("Path does not exist: {}", full_path_str)));
            }
            Err(e) => return Err(e.into()),
        };
        if !metadata.is_dir() {
            return Err(OrthoError::NotADirectory(format!(
                "Path is not a directory: {}",
                full_path_str
            )));
        }

        let mut files = fs::read_dir(&full_path)?
            .map(|entry| entry.map(|e| e.file_name().to_string_lossy().into_owned()))
            .collect::<Result<Vec<_>, _>>()?;
        files.sort();

        debug!(path = %full_path_str, entries = files.len(), "Listed storage directory");
        Ok(StorageListing {
            full_path: full_path_str,
            files,
        })
    }

    fn absolute_root(&self) -> OrthoResult<PathBuf> {
        let root = if self.root.is_absolute() {
            self.root.clone()
        } else {
            std::env::current_dir()?.join(&self.root)
        };
        Ok(normalize_path(&root))
    }
}
