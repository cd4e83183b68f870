//! Orthophoto API Service Library
//!
//! HTTP front end for processing drone orthophoto archives stored on a
//! local filesystem and serving the derived bounds and imagery.

pub mod config;
pub mod error;
pub mod handlers;
pub mod state;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Extension, Router,
};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;

/// Build the router with all routes and middleware.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Processing
        .route(
            "/projects/:project_id/process/",
            post(handlers::process::process_project_handler),
        )
        .route(
            "/projects/:project_id/process",
            post(handlers::process::process_project_handler),
        )
        // Project outputs
        .route(
            "/projects/:project_id/bounds",
            get(handlers::bounds::get_bounds_handler),
        )
        .route(
            "/projects/:project_id/orthophoto",
            get(handlers::orthophoto::orthophoto_handler),
        )
        // Storage inspection
        .route(
            "/check-storage",
            get(handlers::storage::check_storage_handler),
        )
        // Health and metrics
        .route("/health", get(handlers::health::health_handler))
        .route("/ready", get(handlers::health::ready_handler))
        .route("/metrics", get(handlers::health::metrics_handler))
        // Middleware
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
}
