//! The processing pipeline for one project.
//!
//! A run walks through fixed stages in order:
//!
//! ```text
//! NotStarted -> Extracted -> RasterLocated -> Converted -> BoundsComputed -> Persisted
//! ```
//!
//! There is no retry and no rollback. A failure leaves whatever earlier
//! stages wrote on disk, and running again simply overwrites it.

use std::fmt;
use std::path::PathBuf;
use std::time::Instant;

use metrics::{counter, histogram};
use ortho_common::GeoBounds;
use serde::Serialize;
use storage::{ProjectLayout, ProjectStore};
use tracing::{debug, error, info};

use crate::archive::extract_archive;
use crate::bounds::compute_geo_bounds;
use crate::error::{IngestionError, Result};

/// Where a pipeline run has got to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineStage {
    NotStarted,
    Extracted,
    RasterLocated,
    Converted,
    BoundsComputed,
    Persisted,
}

impl PipelineStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStage::NotStarted => "not_started",
            PipelineStage::Extracted => "extracted",
            PipelineStage::RasterLocated => "raster_located",
            PipelineStage::Converted => "converted",
            PipelineStage::BoundsComputed => "bounds_computed",
            PipelineStage::Persisted => "persisted",
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outputs of a successful run.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessingResult {
    pub bounds: GeoBounds,
    pub png_path: PathBuf,
    pub bounds_json_path: PathBuf,
}

/// Runs the pipeline against projects in a storage root.
#[derive(Debug, Clone)]
pub struct ProjectProcessor {
    store: ProjectStore,
}

impl ProjectProcessor {
    pub fn new(store: ProjectStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &ProjectStore {
        &self.store
    }

    /// Extract the project's archive, convert its orthophoto to PNG and
    /// persist the geographic bounds.
    ///
    /// Blocking; async callers should run this on a blocking thread.
    pub fn process(&self, project_id: &str) -> Result<ProcessingResult> {
        let layout = self.store.project(project_id)?;
        info!(
            project_id,
            project_dir = %layout.dir().display(),
            "Processing project"
        );

        let started = Instant::now();
        let result = self.run(project_id, &layout)?;

        counter!("ortho_projects_processed_total").increment(1);
        info!(
            project_id,
            png_path = %result.png_path.display(),
            bounds_json_path = %result.bounds_json_path.display(),
            duration_ms = started.elapsed().as_millis() as u64,
            "Project processed"
        );
        Ok(result)
    }

    fn run(&self, project_id: &str, layout: &ProjectLayout) -> Result<ProcessingResult> {
        stage(project_id, PipelineStage::Extracted, || {
            let archive = layout.archive();
            if !archive.is_file() {
                return Err(IngestionError::NotFound(
                    "all.zip file not found in project folder".to_string(),
                ));
            }
            extract_archive(&archive, layout.dir())
        })?;

        let tif = stage(project_id, PipelineStage::RasterLocated, || {
            let tif = layout.orthophoto_tif();
            if !tif.is_file() {
                return Err(IngestionError::NotFound(
                    "GeoTIFF file odm_orthophoto.tif not found in odm_orthophoto/".to_string(),
                ));
            }
            Ok(tif)
        })?;

        let png_path = layout.orthophoto_png();
        stage(project_id, PipelineStage::Converted, || {
            Ok(renderer::convert_to_png(&tif, &png_path)?)
        })?;

        let bounds = stage(project_id, PipelineStage::BoundsComputed, || {
            Ok(compute_geo_bounds(&tif)?)
        })?;

        let bounds_json_path = stage(project_id, PipelineStage::Persisted, || {
            Ok(self.store.write_bounds(project_id, &bounds)?)
        })?;

        Ok(ProcessingResult {
            bounds,
            png_path,
            bounds_json_path,
        })
    }
}

/// Run one stage transition, timing it and recording failures under the
/// stage being entered.
fn stage<T: fmt::Debug>(
    project_id: &str,
    stage: PipelineStage,
    f: impl FnOnce() -> Result<T>,
) -> Result<T> {
    let started = Instant::now();
    let outcome = f();
    let elapsed = started.elapsed();

    histogram!("ortho_pipeline_stage_seconds", "stage" => stage.as_str())
        .record(elapsed.as_secs_f64());

    match outcome {
        Ok(value) => {
            debug!(
                project_id,
                stage = %stage,
                elapsed_ms = elapsed.as_millis() as u64,
                output = ?value,
                "Pipeline stage complete"
            );
            Ok(value)
        }
        Err(e) => {
            counter!("ortho_pipeline_failures_total", "stage" => stage.as_str()).increment(1);
            error!(project_id, stage = %stage, error = %e, "Pipeline stage failed");
            Err(e)
        }
    }
}
