//! Storage layout for drone orthophoto projects.
//!
//! Everything lives under a single storage root:
//! - `projects/{project_id}/all.zip` uploaded by the client
//! - `projects/{project_id}/odm_orthophoto/` extracted raster and PNG
//! - `projects/{project_id}/bounds.json` geographic bounds document
//!
//! The storage root is always passed in explicitly; nothing here reads
//! environment variables.

pub mod layout;
pub mod listing;
pub mod project_store;

pub use layout::ProjectLayout;
pub use listing::{normalize_path, StorageListing};
pub use project_store::ProjectStore;
