//! Orthophoto API Server
//!
//! Processes uploaded drone orthophoto archives and serves their bounds.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use metrics_exporter_prometheus::PrometheusBuilder;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use ortho_api::config::{ServiceConfig, DEFAULT_STORAGE_ROOT};
use ortho_api::create_router;
use ortho_api::state::AppState;

/// Orthophoto API Server
#[derive(Parser, Debug)]
#[command(name = "ortho-api")]
#[command(about = "Unzips drone orthophoto archives, converts them to PNG and serves their bounds")]
struct Args {
    /// Storage root containing projects/{project_id}/all.zip
    #[arg(long, default_value = DEFAULT_STORAGE_ROOT, env = "LOCAL_STORAGE_URL")]
    storage_root: PathBuf,

    /// Listen address
    #[arg(short, long, default_value = "0.0.0.0:8000", env = "ORTHO_LISTEN_ADDR")]
    listen: String,

    /// Log level
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Number of worker threads
    #[arg(long, env = "ORTHO_WORKER_THREADS")]
    worker_threads: Option<usize>,
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Build runtime with configured threads
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(threads) = args.worker_threads {
        runtime_builder.worker_threads(threads);
    }

    let runtime = runtime_builder
        .build()
        .context("Failed to create Tokio runtime")?;

    runtime.block_on(run_server(args))
}

async fn run_server(args: Args) -> Result<()> {
    // Initialize tracing
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .json()
        .init();

    let prometheus = PrometheusBuilder::new()
        .install_recorder()
        .context("Failed to install Prometheus recorder")?;

    info!("Starting orthophoto API server");

    let config = ServiceConfig::new(args.storage_root);
    if !config.storage_root.is_dir() {
        warn!(
            storage_root = %config.storage_root.display(),
            "Storage root is not a directory; /ready will report unavailable"
        );
    }
    info!(storage_root = %config.storage_root.display(), "Using storage root");

    let state = Arc::new(AppState::new(config, Some(prometheus)));
    let app = create_router(state);

    let addr: SocketAddr = args
        .listen
        .parse()
        .with_context(|| format!("Invalid listen address: {}", args.listen))?;

    info!("Orthophoto API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("Server failed")?;

    Ok(())
}
