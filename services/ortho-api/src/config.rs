//! Service configuration.

use std::path::PathBuf;

/// Default storage root when `LOCAL_STORAGE_URL` is not set.
pub const DEFAULT_STORAGE_ROOT: &str = "/data/droneuploads";

/// Settings resolved once at startup and shared through `AppState`.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Directory containing `projects/{project_id}/...`.
    pub storage_root: PathBuf,
}

impl ServiceConfig {
    pub fn new(storage_root: impl Into<PathBuf>) -> Self {
        Self {
            storage_root: storage_root.into(),
        }
    }
}
