//! POST /projects/:project_id/process/

use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    Json,
};
use ingestion::ProcessingResult;
use serde::Serialize;
use tracing::info;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ProcessResponse {
    pub message: &'static str,
    #[serde(flatten)]
    pub result: ProcessingResult,
}

/// Run the full pipeline for a project and return its bounds and output
/// paths.
pub async fn process_project_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(project_id): Path<String>,
) -> Result<Json<ProcessResponse>, ApiError> {
    info!(project_id = %project_id, "Process request");

    let worker = Arc::clone(&state);
    let result =
        tokio::task::spawn_blocking(move || worker.processor.process(&project_id)).await??;

    Ok(Json(ProcessResponse {
        message: "Unzipped and processed successfully",
        result,
    }))
}
