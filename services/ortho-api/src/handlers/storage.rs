//! GET /check-storage

use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CheckStorageQuery {
    /// Path relative to the storage root; empty means the root itself
    #[serde(default)]
    pub subpath: String,
}

#[derive(Debug, Serialize)]
pub struct CheckStorageResponse {
    pub message: &'static str,
    pub full_path: String,
    pub files: Vec<String>,
}

/// List a directory under the storage root.
pub async fn check_storage_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(query): Query<CheckStorageQuery>,
) -> Result<Json<CheckStorageResponse>, ApiError> {
    let store = state.store.clone();
    let listing =
        tokio::task::spawn_blocking(move || store.check_storage(&query.subpath)).await??;

    Ok(Json(CheckStorageResponse {
        message: "Path is accessible.",
        full_path: listing.full_path,
        files: listing.files,
    }))
}
