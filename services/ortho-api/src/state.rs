//! Application state for the orthophoto API.

use ingestion::ProjectProcessor;
use metrics_exporter_prometheus::PrometheusHandle;
use storage::ProjectStore;

use crate::config::ServiceConfig;

/// Shared application state.
pub struct AppState {
    pub config: ServiceConfig,

    /// Read-side access to project directories.
    pub store: ProjectStore,

    /// Pipeline runner over the same storage root.
    pub processor: ProjectProcessor,

    /// Set when a Prometheus recorder is installed; `/metrics` renders it.
    pub prometheus: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(config: ServiceConfig, prometheus: Option<PrometheusHandle>) -> Self {
        let store = ProjectStore::new(config.storage_root.clone());
        let processor = ProjectProcessor::new(store.clone());
        Self {
            config,
            store,
            processor,
            prometheus,
        }
    }
}
