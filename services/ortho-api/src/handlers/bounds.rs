//! GET /projects/:project_id/bounds

use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use crate::error::ApiError;
use crate::state::AppState;

/// Return the stored `bounds.json` document byte for byte.
pub async fn get_bounds_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(project_id): Path<String>,
) -> Result<Response, ApiError> {
    let store = state.store.clone();
    let document = tokio::task::spawn_blocking(move || store.read_bounds(&project_id)).await??;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        document.get().to_owned(),
    )
        .into_response())
}
