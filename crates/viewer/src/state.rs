use crate::config::ViewerConfig;
use crate::metrics::StreamMetrics;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Shared application state (thread-safe)
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ViewerConfig>,
    pub metrics: StreamMetrics,
    /// Cancelled on shutdown; every watch session runs on a child token.
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            config: Arc::new(config),
            metrics: StreamMetrics::new(),
            shutdown: CancellationToken::new(),
        }
    }

    /// Signal shutdown to all open streams
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }
}
