//! Shared application state for the collector.
//!
//! Built once at startup and cloned into every handler and the ingest loop.
//! The registry inside lives for the whole process.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::obs::metrics::ServerMetrics;
use crate::registry::Registry;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    registry: Arc<Registry>,
    metrics: Arc<ServerMetrics>,
}

struct AppStateInner {
    cfg: ServerConfig,
}

impl AppState {
    pub fn new(cfg: ServerConfig) -> Self {
        let registry = Arc::new(Registry::new(cfg.registry.completed_capacity));
        Self {
            inner: Arc::new(AppStateInner { cfg }),
            registry,
            metrics: Arc::new(ServerMetrics::default()),
        }
    }

    pub fn cfg(&self) -> &ServerConfig {
        &self.inner.cfg
    }

    pub fn registry(&self) -> Arc<Registry> {
        Arc::clone(&self.registry)
    }

    pub fn metrics(&self) -> Arc<ServerMetrics> {
        Arc::clone(&self.metrics)
    }

    pub fn is_draining(&self) -> bool {
        self.metrics.is_draining()
    }
}
