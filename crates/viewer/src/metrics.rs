use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Counters for SSE watch sessions
#[derive(Clone, Default)]
pub struct StreamMetrics {
    inner: Arc<StreamMetricsInner>,
}

#[derive(Default)]
struct StreamMetricsInner {
    active_streams: AtomicU64,
    total_streams: AtomicU64,
    frames_sent: AtomicU64,
    bytes_sent: AtomicU64,
    failed_streams: AtomicU64,
}

impl StreamMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stream_started(&self) {
        self.inner.active_streams.fetch_add(1, Ordering::Relaxed);
        self.inner.total_streams.fetch_add(1, Ordering::Relaxed);

        tracing::debug!(
            active = self.inner.active_streams.load(Ordering::Relaxed),
            "Stream started"
        );
    }

    pub fn stream_ended(&self) {
        // Saturating: never wraps below zero
        let _ = self.inner.active_streams.fetch_update(
            Ordering::Relaxed,
            Ordering::Relaxed,
            |current| current.checked_sub(1),
        );

        tracing::debug!(
            active = self.inner.active_streams.load(Ordering::Relaxed),
            "Stream ended"
        );
    }

    pub fn stream_failed(&self) {
        self.inner.failed_streams.fetch_add(1, Ordering::Relaxed);
    }

    pub fn frame_sent(&self, bytes: usize) {
        self.inner.frames_sent.fetch_add(1, Ordering::Relaxed);
        self.inner.bytes_sent.fetch_add(bytes as u64, Ordering::Relaxed);
    }

    pub fn active_count(&self) -> u64 {
        self.inner.active_streams.load(Ordering::Relaxed)
    }

    pub fn total_streams(&self) -> u64 {
        self.inner.total_streams.load(Ordering::Relaxed)
    }

    pub fn failed_count(&self) -> u64 {
        self.inner.failed_streams.load(Ordering::Relaxed)
    }

    pub fn frames_sent(&self) -> u64 {
        self.inner.frames_sent.load(Ordering::Relaxed)
    }

    pub fn bytes_sent(&self) -> u64 {
        self.inner.bytes_sent.load(Ordering::Relaxed)
    }
}
