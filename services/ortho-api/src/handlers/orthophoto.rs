//! GET /projects/:project_id/orthophoto

use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use ortho_common::OrthoError;
use renderer::{thumbnail_png, ThumbnailSize};
use serde::Deserialize;
use tracing::debug;

use crate::error::ApiError;
use crate::state::AppState;

/// Files at or below this size are served as is even when a preview size
/// is requested.
pub const PREVIEW_THRESHOLD_BYTES: u64 = 1024 * 1024;

#[derive(Debug, Deserialize)]
pub struct OrthophotoQuery {
    /// `small` or `medium`
    pub size: Option<String>,
}

/// Serve the converted PNG, optionally downscaled.
pub async fn orthophoto_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(project_id): Path<String>,
    Query(query): Query<OrthophotoQuery>,
) -> Result<Response, ApiError> {
    let size = query
        .size
        .as_deref()
        .map(str::parse::<ThumbnailSize>)
        .transpose()
        .map_err(|message| OrthoError::InvalidParameter {
            param: "size".to_string(),
            message,
        })?;

    let png_path = state.store.project(&project_id)?.orthophoto_png();

    let bytes = tokio::task::spawn_blocking(move || -> Result<Vec<u8>, ApiError> {
        let metadata = std::fs::metadata(&png_path).map_err(|_| {
            OrthoError::NotFound("Orthophoto PNG not found, process the project first".to_string())
        })?;

        match size {
            Some(size) if metadata.len() > PREVIEW_THRESHOLD_BYTES => {
                debug!(path = %png_path.display(), ?size, bytes = metadata.len(), "Serving resized orthophoto");
                Ok(thumbnail_png(&png_path, size)?)
            }
            _ => Ok(std::fs::read(&png_path).map_err(OrthoError::from)?),
        }
    })
    .await??;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "image/png"),
            (header::CONTENT_DISPOSITION, "inline; filename=\"odm_orthophoto.png\""),
        ],
        bytes,
    )
        .into_response())
}
